use std::path::Path;

use anyhow::{Context, Result};
use biolex_core::adapter::load_documents;
use biolex_core::export::{write_json_lines, write_lookup_csv};
use biolex_core::{CorpusConfig, CorpusFamily, JsonLinesAdapter};

use super::{open_output, CorpusInput, OutputArgs};

pub fn run(
    config: &CorpusConfig,
    input: &CorpusInput,
    strict: bool,
    documents_out: Option<&Path>,
    output: &OutputArgs,
) -> Result<()> {
    let path = input.resolve(config, CorpusFamily::Ctd)?;
    let documents = load_documents(&JsonLinesAdapter::new(&path))
        .with_context(|| format!("failed to read adapter output {}", path.display()))?;

    let table = super::lookup::builder(strict)
        .build(documents.iter().flat_map(|d| d.mentions.iter()))?;
    write_lookup_csv(&table, CorpusFamily::Ctd.into(), output.writer()?)?;

    if let Some(documents_out) = documents_out {
        write_json_lines(&documents, open_output(Some(documents_out))?)?;
        eprintln!("Wrote {} documents to {}", documents.len(), documents_out.display());
    }

    eprintln!(
        "Built {} lookup rows from {} documents",
        table.len(),
        documents.len()
    );
    Ok(())
}
