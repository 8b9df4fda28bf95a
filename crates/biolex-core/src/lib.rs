pub mod adapter;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod ingest;
pub mod lookup;
pub mod pipeline;
pub mod preprocess;
pub mod relation;

pub use adapter::{
    AdapterDocument, AdapterMention, AdapterRelation, AnnotationAdapter, CtdDocument, CtdMention,
    JsonLinesAdapter,
};
pub use config::{CorpusConfig, CorpusFamily, Split};
pub use document::{Corpus, Document, EntityMention, MentionIds};
pub use error::{Error, Result};
pub use export::ColumnNaming;
pub use ingest::{DocumentParser, LineParser, RelationExtractor};
pub use lookup::{LookupRow, LookupSource, LookupTable, LookupTableBuilder, MissingFieldPolicy};
pub use pipeline::{BatchResult, CorpusData, CorpusOutput, CorpusPipeline, CorpusStats};
pub use relation::{CtdRelation, Relation};
