use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace};

use crate::document::{Corpus, EntityMention};
use crate::error::{Error, Result};

const TITLE_MARKER: &str = "|t|";
const ABSTRACT_MARKER: &str = "|a|";

/// A one-pass parser over the lines of a corpus file.
///
/// Implementors consume one line at a time into an accumulator; the provided
/// methods handle line numbering and the different input sources. Any error
/// aborts the whole input, no partial output is returned.
pub trait LineParser {
    type Output: Default;

    /// Consumes one line. `line_no` is 1-based.
    fn parse_line(&self, output: &mut Self::Output, line_no: usize, line: &str) -> Result<()>;

    fn parse_lines<I>(&self, lines: I) -> Result<Self::Output>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut output = Self::Output::default();
        for (i, line) in lines.into_iter().enumerate() {
            self.parse_line(&mut output, i + 1, line.as_ref())?;
        }
        Ok(output)
    }

    fn parse_str(&self, text: &str) -> Result<Self::Output> {
        self.parse_lines(text.lines())
    }

    fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Self::Output> {
        let mut output = Self::Output::default();
        for (i, line) in reader.lines().enumerate() {
            self.parse_line(&mut output, i + 1, &line?)?;
        }
        Ok(output)
    }

    fn parse_file(&self, path: &Path) -> Result<Self::Output> {
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        debug!(path = %path.display(), "parsing corpus file");
        self.parse_reader(BufReader::new(File::open(path)?))
    }
}

/// Parses PubTator title, abstract and entity annotation lines into
/// documents.
///
/// Annotation lines that do not split into exactly six tab separated fields
/// are skipped without error; this also covers relation lines, which have
/// four.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentParser;

impl DocumentParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LineParser for DocumentParser {
    type Output = Corpus;

    fn parse_line(&self, corpus: &mut Corpus, line_no: usize, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if line.contains(TITLE_MARKER) || line.contains(ABSTRACT_MARKER) {
            parse_text_line(corpus, line);
            return Ok(());
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let &[id, start, end, text, entity_type, ids] = fields.as_slice() else {
            trace!(line = line_no, fields = fields.len(), "skipping non-annotation line");
            return Ok(());
        };

        let start = parse_offset(start, line_no, "start")?;
        let end = parse_offset(end, line_no, "end")?;
        if start > end {
            return Err(Error::MalformedAnnotation {
                line: line_no,
                reason: format!("start offset {start} exceeds end offset {end}"),
            });
        }

        corpus
            .entry(id)
            .entities
            .push(EntityMention::new(text, entity_type, start, end, ids));
        Ok(())
    }
}

fn parse_text_line(corpus: &mut Corpus, line: &str) {
    let Some((id, rest)) = line.split_once('|') else {
        return;
    };
    let (tag, text) = rest.split_once('|').unwrap_or((rest, ""));

    let document = corpus.entry(id);
    match tag {
        "t" => document.title = text.to_string(),
        "a" => document.abstract_text = text.to_string(),
        _ => trace!(id, tag, "ignoring unknown text tag"),
    }
}

fn parse_offset(value: &str, line_no: usize, name: &str) -> Result<usize> {
    value.parse().map_err(|_| Error::MalformedAnnotation {
        line: line_no,
        reason: format!("{name} offset '{value}' is not a non-negative integer"),
    })
}
