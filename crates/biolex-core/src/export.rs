use std::io::Write;

use serde::Serialize;

use crate::config::CorpusFamily;
use crate::error::Result;
use crate::lookup::LookupTable;
use crate::relation::Relation;

/// Header of an exported lookup table. The two corpus families name their
/// columns differently and that difference is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnNaming {
    /// `Text,Type,Mesh`
    Bc5cdr,
    /// `text,type,id`
    Ctd,
}

impl ColumnNaming {
    #[must_use]
    pub const fn headers(&self) -> [&'static str; 3] {
        match self {
            Self::Bc5cdr => ["Text", "Type", "Mesh"],
            Self::Ctd => ["text", "type", "id"],
        }
    }
}

impl From<CorpusFamily> for ColumnNaming {
    fn from(family: CorpusFamily) -> Self {
        match family {
            CorpusFamily::Bc5cdr => Self::Bc5cdr,
            CorpusFamily::Ctd => Self::Ctd,
        }
    }
}

pub fn write_lookup_csv<W: Write>(table: &LookupTable, naming: ColumnNaming, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(naming.headers())?;
    for row in table {
        csv.write_record([&row.text, &row.entity_type, &row.id])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes relations with `number,chemical,disease` columns.
pub fn write_relations_csv<W: Write>(relations: &[Relation], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    if relations.is_empty() {
        csv.write_record(["number", "chemical", "disease"])?;
    }
    for relation in relations {
        csv.serialize(relation)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_json<T, W>(value: &T, mut writer: W, pretty: bool) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// One JSON record per line.
pub fn write_json_lines<'a, T, I, W>(items: I, mut writer: W) -> Result<()>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
    W: Write,
{
    for item in items {
        serde_json::to_writer(&mut writer, item)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
