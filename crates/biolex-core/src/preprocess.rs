use std::path::Path;

use crate::error::{Error, Result};

/// Reads a whole UTF-8 text file.
pub fn load_text_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Trims the text and collapses every whitespace run to a single space.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
