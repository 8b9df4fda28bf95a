use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier field of a mention.
///
/// PubTator annotation lines carry a single raw field that may still hold a
/// composite (`D000001|D000002`) or sentinel (`-1`) value. Splitting and
/// normalization happen in the lookup table builder, never at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MentionIds {
    Single(String),
    Many(Vec<String>),
}

impl MentionIds {
    /// Candidate identifiers in source order, one per element.
    pub fn candidates(&self) -> Vec<&str> {
        match self {
            Self::Single(id) => vec![id.as_str()],
            Self::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for MentionIds {
    fn from(id: &str) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<String> for MentionIds {
    fn from(id: String) -> Self {
        Self::Single(id)
    }
}

impl From<Vec<String>> for MentionIds {
    fn from(ids: Vec<String>) -> Self {
        Self::Many(ids)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMention {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub start: usize,
    pub end: usize,
    pub ids: MentionIds,
}

impl EntityMention {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        entity_type: impl Into<String>,
        start: usize,
        end: usize,
        ids: impl Into<MentionIds>,
    ) -> Self {
        Self {
            text: text.into(),
            entity_type: entity_type.into(),
            start,
            end,
            ids: ids.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub entities: Vec<EntityMention>,
}

impl Document {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            abstract_text: String::new(),
            entities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = abstract_text.into();
        self
    }
}

/// Documents of one parsed corpus file, in first-seen id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
    index: HashMap<String, usize>,
}

impl Corpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the document for `id`, creating it on first reference.
    pub(crate) fn entry(&mut self, id: &str) -> &mut Document {
        let position = match self.index.get(id) {
            Some(&position) => position,
            None => {
                self.documents.push(Document::new(id));
                let position = self.documents.len() - 1;
                self.index.insert(id.to_string(), position);
                position
            }
        };
        &mut self.documents[position]
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.index.get(id).map(|&position| &self.documents[position])
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All mentions across documents, document order then line order.
    pub fn mentions(&self) -> impl Iterator<Item = &EntityMention> {
        self.documents.iter().flat_map(|d| d.entities.iter())
    }

    pub fn mention_count(&self) -> usize {
        self.documents.iter().map(|d| d.entities.len()).sum()
    }

    #[must_use]
    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

impl FromIterator<Document> for Corpus {
    /// Later documents with an already seen id replace the earlier one in
    /// place, keeping the first-seen position.
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut corpus = Self::new();
        for document in iter {
            let id = document.id.clone();
            *corpus.entry(&id) = document;
        }
        corpus
    }
}
