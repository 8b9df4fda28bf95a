mod parser;
mod relations;

pub use parser::{DocumentParser, LineParser};
pub use relations::RelationExtractor;
