use std::path::{Path, PathBuf};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use crate::adapter::{load_documents, CtdDocument, JsonLinesAdapter};
use crate::config::{CorpusConfig, CorpusFamily, Split};
use crate::document::Corpus;
use crate::error::{Error, Result};
use crate::ingest::{DocumentParser, LineParser, RelationExtractor};
use crate::lookup::{LookupTable, LookupTableBuilder};
use crate::relation::Relation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub documents: usize,
    pub mentions: usize,
    pub relations: usize,
    pub lookup_rows: usize,
    pub duration_ms: u64,
}

impl CorpusStats {
    fn add(&mut self, other: &Self) {
        self.documents += other.documents;
        self.mentions += other.mentions;
        self.relations += other.relations;
        self.lookup_rows += other.lookup_rows;
        self.duration_ms += other.duration_ms;
    }
}

#[derive(Debug, Clone)]
pub enum CorpusData {
    Bc5cdr {
        corpus: Corpus,
        relations: Vec<Relation>,
    },
    Ctd {
        documents: Vec<CtdDocument>,
    },
}

#[derive(Debug, Clone)]
pub struct CorpusOutput {
    pub family: CorpusFamily,
    pub source: PathBuf,
    pub data: CorpusData,
    pub lookup: LookupTable,
    pub stats: CorpusStats,
}

/// Parses one corpus file per call and derives its lookup table.
///
/// Calls share nothing but the configuration, so splits can be processed
/// independently.
#[derive(Debug, Clone, Default)]
pub struct CorpusPipeline {
    config: CorpusConfig,
    builder: LookupTableBuilder,
}

impl CorpusPipeline {
    #[must_use]
    pub fn new(config: CorpusConfig) -> Self {
        Self {
            config,
            builder: LookupTableBuilder::new(),
        }
    }

    #[must_use]
    pub const fn with_builder(mut self, builder: LookupTableBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub const fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn process_split(&self, family: CorpusFamily, split: Split) -> Result<CorpusOutput> {
        self.process_file(family, &self.config.split_path(family, split))
    }

    pub fn process_file(&self, family: CorpusFamily, path: &Path) -> Result<CorpusOutput> {
        let start = Instant::now();

        let (data, lookup) = match family {
            CorpusFamily::Bc5cdr => {
                let corpus = DocumentParser::new().parse_file(path)?;
                let relations = RelationExtractor::new().parse_file(path)?;
                let lookup = self.builder.build_from_corpus(&corpus)?;
                (CorpusData::Bc5cdr { corpus, relations }, lookup)
            }
            CorpusFamily::Ctd => {
                let documents = load_documents(&JsonLinesAdapter::new(path))?;
                let lookup = self
                    .builder
                    .build(documents.iter().flat_map(|d| d.mentions.iter()))?;
                (CorpusData::Ctd { documents }, lookup)
            }
        };

        let (documents, mentions, relations) = match &data {
            CorpusData::Bc5cdr { corpus, relations } => {
                (corpus.len(), corpus.mention_count(), relations.len())
            }
            CorpusData::Ctd { documents } => (
                documents.len(),
                documents.iter().map(|d| d.mentions.len()).sum(),
                documents.iter().map(|d| d.relations.len()).sum(),
            ),
        };
        let stats = CorpusStats {
            documents,
            mentions,
            relations,
            lookup_rows: lookup.len(),
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        info!(
            family = %family,
            path = %path.display(),
            documents = stats.documents,
            mentions = stats.mentions,
            relations = stats.relations,
            lookup_rows = stats.lookup_rows,
            "processed corpus"
        );

        Ok(CorpusOutput {
            family,
            source: path.to_path_buf(),
            data,
            lookup,
            stats,
        })
    }

    /// Processes each split independently; a failing split does not stop
    /// the others.
    pub fn run_splits(&self, family: CorpusFamily, splits: &[Split]) -> BatchResult {
        #[cfg(feature = "parallel")]
        let outcomes: Vec<(Split, Result<CorpusOutput>)> = splits
            .par_iter()
            .map(|&split| (split, self.process_split(family, split)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<(Split, Result<CorpusOutput>)> = splits
            .iter()
            .map(|&split| (split, self.process_split(family, split)))
            .collect();

        let mut result = BatchResult::new();
        for (split, outcome) in outcomes {
            match outcome {
                Ok(output) => result.add_success(split, output),
                Err(e) => result.add_failure(split, e),
            }
        }
        result
    }
}

#[derive(Debug, Default)]
pub struct BatchResult {
    pub successful: Vec<(Split, CorpusOutput)>,
    pub failed: Vec<(Split, Error)>,
    pub total_stats: CorpusStats,
}

impl BatchResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn add_success(&mut self, split: Split, output: CorpusOutput) {
        self.total_stats.add(&output.stats);
        self.successful.push((split, output));
    }

    fn add_failure(&mut self, split: Split, error: Error) {
        self.failed.push((split, error));
    }

    pub fn success_count(&self) -> usize {
        self.successful.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }
}
