use anyhow::{Context, Result};
use biolex_core::export::{write_json, write_json_lines};
use biolex_core::{CorpusConfig, CorpusFamily, DocumentParser, LineParser};

use super::{CorpusInput, OutputArgs};

pub fn run(config: &CorpusConfig, input: &CorpusInput, lines: bool, output: &OutputArgs) -> Result<()> {
    let path = input.resolve(config, CorpusFamily::Bc5cdr)?;
    let corpus = DocumentParser::new()
        .parse_file(&path)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let writer = output.writer()?;
    if lines {
        write_json_lines(corpus.documents(), writer)?;
    } else {
        write_json(corpus.documents(), writer, true)?;
    }

    eprintln!(
        "Parsed {} documents, {} mentions",
        corpus.len(),
        corpus.mention_count()
    );
    Ok(())
}
