use anyhow::{Context, Result};
use biolex_core::export::{write_json, write_relations_csv};
use biolex_core::{CorpusConfig, CorpusFamily, LineParser, RelationExtractor};

use super::{CorpusInput, Format, OutputArgs};

pub fn run(config: &CorpusConfig, input: &CorpusInput, format: Format, output: &OutputArgs) -> Result<()> {
    let path = input.resolve(config, CorpusFamily::Bc5cdr)?;
    let relations = RelationExtractor::new()
        .parse_file(&path)
        .with_context(|| format!("failed to extract relations from {}", path.display()))?;

    let writer = output.writer()?;
    match format {
        Format::Json => write_json(&relations, writer, true)?,
        Format::Csv => write_relations_csv(&relations, writer)?,
    }

    eprintln!("Extracted {} relations", relations.len());
    Ok(())
}
