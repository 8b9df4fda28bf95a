//! Entity lookup table: normalized `(text, type, id)` triples derived from
//! corpus mentions.
//!
//! The normalization steps run in a fixed order and the order matters: text is
//! capitalized *before* surrounding whitespace is stripped, so `" aspirin"`
//! ends up as `"aspirin"` while `"aspirin"` becomes `"Aspirin"`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::CtdMention;
use crate::document::{Corpus, EntityMention};
use crate::error::{Error, Result};

/// Length of an identifier holding two 7-character codes joined by `|`.
pub const COMPOSITE_ID_LEN: usize = 15;
const COMPOSITE_SEPARATOR: char = '|';

pub const SENTINEL_ID: &str = "-1";
pub const UNKNOWN_ID: &str = "Unknown";

/// Rendering of an absent field under [`MissingFieldPolicy::Coerce`].
pub const MISSING_VALUE: &str = "None";

/// Anything that can contribute rows to a lookup table.
pub trait LookupSource {
    fn text(&self) -> Option<&str>;

    fn entity_type(&self) -> Option<&str>;

    /// Candidate identifiers; `None` when the record has no identifier at all.
    fn ids(&self) -> Option<Vec<&str>>;
}

impl LookupSource for EntityMention {
    fn text(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn entity_type(&self) -> Option<&str> {
        Some(&self.entity_type)
    }

    fn ids(&self) -> Option<Vec<&str>> {
        Some(self.ids.candidates())
    }
}

impl LookupSource for CtdMention {
    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }

    fn ids(&self) -> Option<Vec<&str>> {
        self.id.as_deref().map(|id| vec![id])
    }
}

impl LookupSource for LookupRow {
    fn text(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn entity_type(&self) -> Option<&str> {
        Some(&self.entity_type)
    }

    fn ids(&self) -> Option<Vec<&str>> {
        Some(vec![self.id.as_str()])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LookupRow {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub id: String,
}

impl LookupRow {
    #[must_use]
    pub fn new(text: impl Into<String>, entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

/// How to treat mentions lacking text, type or identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Substitute [`MISSING_VALUE`] and keep going.
    #[default]
    Coerce,
    /// Abort the build with [`Error::MalformedMention`].
    Reject,
}

/// Deduplicated lookup rows.
///
/// Rows are kept in first-seen order for stable output, but two tables are
/// equal when they hold the same set of rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTable {
    rows: Vec<LookupRow>,
}

impl LookupTable {
    pub fn rows(&self) -> &[LookupRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LookupRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row: &LookupRow) -> bool {
        self.rows.contains(row)
    }

    pub fn to_set(&self) -> HashSet<LookupRow> {
        self.rows.iter().cloned().collect()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<LookupRow> {
        self.rows
    }
}

impl PartialEq for LookupTable {
    fn eq(&self, other: &Self) -> bool {
        self.to_set() == other.to_set()
    }
}

impl Eq for LookupTable {}

impl<'a> IntoIterator for &'a LookupTable {
    type Item = &'a LookupRow;
    type IntoIter = std::slice::Iter<'a, LookupRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LookupTableBuilder {
    policy: MissingFieldPolicy,
}

impl LookupTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: MissingFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn policy(&self) -> MissingFieldPolicy {
        self.policy
    }

    pub fn build_from_corpus(&self, corpus: &Corpus) -> Result<LookupTable> {
        self.build(corpus.mentions())
    }

    pub fn build<'a, T, I>(&self, mentions: I) -> Result<LookupTable>
    where
        T: LookupSource + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let candidates = self.flatten(mentions)?;
        let before = candidates.len();

        let candidates = candidates
            .into_iter()
            .map(|row| LookupRow {
                text: capitalize(&row.text),
                ..row
            })
            .map(|row| LookupRow {
                text: row.text.trim().to_string(),
                entity_type: row.entity_type.trim().to_string(),
                id: row.id.trim().to_string(),
            })
            .flat_map(split_composite)
            .map(|mut row| {
                if row.id == SENTINEL_ID {
                    row.id = UNKNOWN_ID.to_string();
                }
                row
            });

        let mut seen = HashSet::new();
        let rows: Vec<LookupRow> = candidates.filter(|row| seen.insert(row.clone())).collect();

        debug!(candidates = before, rows = rows.len(), "built lookup table");
        Ok(LookupTable { rows })
    }

    fn flatten<'a, T, I>(&self, mentions: I) -> Result<Vec<LookupRow>>
    where
        T: LookupSource + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut candidates = Vec::new();
        for (index, mention) in mentions.into_iter().enumerate() {
            let text = self.field(mention.text(), index, "text")?;
            let entity_type = self.field(mention.entity_type(), index, "type")?;
            let ids = match (mention.ids(), self.policy) {
                (Some(ids), _) => ids,
                (None, MissingFieldPolicy::Coerce) => vec![MISSING_VALUE],
                (None, MissingFieldPolicy::Reject) => {
                    return Err(Error::MalformedMention { index, field: "id" });
                }
            };
            candidates.extend(ids.into_iter().map(|id| LookupRow::new(text, entity_type, id)));
        }
        Ok(candidates)
    }

    fn field<'a>(&self, value: Option<&'a str>, index: usize, field: &'static str) -> Result<&'a str> {
        match (value, self.policy) {
            (Some(value), _) => Ok(value),
            (None, MissingFieldPolicy::Coerce) => Ok(MISSING_VALUE),
            (None, MissingFieldPolicy::Reject) => Err(Error::MalformedMention { index, field }),
        }
    }
}

/// Upper-cases the first character only; the rest is left as is.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars
        .next()
        .map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

/// Splits a 15-character identifier on its `|` separators. Length decides
/// which ids are candidates; an id without a separator is kept as is.
fn split_composite(row: LookupRow) -> Vec<LookupRow> {
    if row.id.chars().count() != COMPOSITE_ID_LEN || !row.id.contains(COMPOSITE_SEPARATOR) {
        return vec![row];
    }

    row.id
        .split(COMPOSITE_SEPARATOR)
        .map(|code| LookupRow::new(row.text.clone(), row.entity_type.clone(), code))
        .collect()
}
