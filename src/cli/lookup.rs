use anyhow::{Context, Result};
use biolex_core::export::write_lookup_csv;
use biolex_core::{
    CorpusConfig, CorpusFamily, DocumentParser, LineParser, LookupTableBuilder, MissingFieldPolicy,
};

use super::{CorpusInput, OutputArgs};

pub fn builder(strict: bool) -> LookupTableBuilder {
    let policy = if strict {
        MissingFieldPolicy::Reject
    } else {
        MissingFieldPolicy::Coerce
    };
    LookupTableBuilder::new().with_policy(policy)
}

pub fn run(config: &CorpusConfig, input: &CorpusInput, strict: bool, output: &OutputArgs) -> Result<()> {
    let path = input.resolve(config, CorpusFamily::Bc5cdr)?;
    let corpus = DocumentParser::new()
        .parse_file(&path)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let table = builder(strict).build_from_corpus(&corpus)?;
    write_lookup_csv(&table, CorpusFamily::Bc5cdr.into(), output.writer()?)?;

    eprintln!(
        "Built {} lookup rows from {} mentions",
        table.len(),
        corpus.mention_count()
    );
    Ok(())
}
