//! Boundary to the external CTD-derived corpus reader.
//!
//! The abstracts and mention tables of that corpus family are parsed
//! elsewhere; this module only defines the records such a reader hands over
//! and turns them into [`CtdDocument`]s. Mentions and relations are kept as
//! separate fields on the converted document.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::relation::CtdRelation;

const ID_PREFIXES: &[&str] = &["id:", "OMIM:"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterMention {
    #[serde(default)]
    pub mention: Option<String>,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub entity_ids: Vec<String>,
    pub ch_start: usize,
    pub ch_end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterRelation {
    pub relation_label: String,
    #[serde(default)]
    pub subj_eid: Option<String>,
    pub subj_type: String,
    #[serde(default)]
    pub obj_eid: Option<String>,
    pub obj_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterDocument {
    pub docid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub mentions: Vec<AdapterMention>,
    #[serde(default)]
    pub relations: Vec<AdapterRelation>,
}

/// Source of already parsed CTD-family documents.
pub trait AnnotationAdapter {
    fn documents(&self) -> Result<Vec<AdapterDocument>>;
}

impl AnnotationAdapter for Vec<AdapterDocument> {
    fn documents(&self) -> Result<Vec<AdapterDocument>> {
        Ok(self.clone())
    }
}

/// Reads adapter output serialized as one JSON document per line.
#[derive(Debug, Clone)]
pub struct JsonLinesAdapter {
    path: PathBuf,
}

impl JsonLinesAdapter {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read<R: BufRead>(reader: R) -> Result<Vec<AdapterDocument>> {
        let mut documents = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            documents.push(serde_json::from_str(&line)?);
        }
        Ok(documents)
    }
}

impl AnnotationAdapter for JsonLinesAdapter {
    fn documents(&self) -> Result<Vec<AdapterDocument>> {
        if !self.path.is_file() {
            return Err(Error::MissingFile(self.path.clone()));
        }
        debug!(path = %self.path.display(), "reading adapter output");
        Self::read(BufReader::new(File::open(&self.path)?))
    }
}

/// Mention of a CTD-family document, reduced to its first identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtdMention {
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub id: Option<String>,
    pub start: usize,
    pub end: usize,
}

impl From<AdapterMention> for CtdMention {
    fn from(m: AdapterMention) -> Self {
        Self {
            text: m.mention,
            entity_type: m.entity_type,
            id: m.entity_ids.first().and_then(|id| clean_id(id)),
            start: m.ch_start,
            end: m.ch_end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtdDocument {
    pub docid: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub mentions: Vec<CtdMention>,
    pub relations: Vec<CtdRelation>,
}

impl From<AdapterDocument> for CtdDocument {
    fn from(doc: AdapterDocument) -> Self {
        let relations = doc
            .relations
            .into_iter()
            .map(|r| CtdRelation {
                document_id: doc.docid.clone(),
                label: r.relation_label,
                subject_id: r.subj_eid.as_deref().and_then(clean_id),
                subject_type: r.subj_type,
                object_id: r.obj_eid.as_deref().and_then(clean_id),
                object_type: r.obj_type,
            })
            .collect();

        Self {
            mentions: doc.mentions.into_iter().map(CtdMention::from).collect(),
            relations,
            docid: doc.docid,
            title: doc.title,
            abstract_text: doc.abstract_text,
        }
    }
}

/// Pulls every document from `adapter` and converts it.
pub fn load_documents(adapter: &impl AnnotationAdapter) -> Result<Vec<CtdDocument>> {
    let documents: Vec<CtdDocument> = adapter
        .documents()?
        .into_iter()
        .map(CtdDocument::from)
        .collect();
    debug!(documents = documents.len(), "converted adapter documents");
    Ok(documents)
}

/// Strips namespace prefixes from an entity id; empty ids become `None`.
pub fn clean_id(id: &str) -> Option<String> {
    if id.is_empty() {
        return None;
    }
    Some(
        ID_PREFIXES
            .iter()
            .fold(id.to_string(), |id, prefix| id.replace(prefix, "")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> AdapterDocument {
        AdapterDocument {
            docid: "1000".into(),
            title: "Title".into(),
            abstract_text: "Lithium causes goiter.".into(),
            mentions: vec![
                AdapterMention {
                    mention: Some("Lithium".into()),
                    entity_type: Some("Chemical".into()),
                    entity_ids: vec!["id:D008094".into(), "D999999".into()],
                    ch_start: 0,
                    ch_end: 7,
                },
                AdapterMention {
                    mention: Some("goiter".into()),
                    entity_type: Some("Disease".into()),
                    entity_ids: vec![],
                    ch_start: 15,
                    ch_end: 21,
                },
            ],
            relations: vec![AdapterRelation {
                relation_label: "chem_disease:marker/mechanism".into(),
                subj_eid: Some("D008094".into()),
                subj_type: "Chemical".into(),
                obj_eid: Some("OMIM:188450".into()),
                obj_type: "Disease".into(),
            }],
        }
    }

    #[test]
    fn test_clean_id() {
        assert_eq!(clean_id("id:D008094"), Some("D008094".into()));
        assert_eq!(clean_id("OMIM:188450"), Some("188450".into()));
        assert_eq!(clean_id("D001241"), Some("D001241".into()));
        assert_eq!(clean_id(""), None);
    }

    #[test]
    fn test_mentions_and_relations_kept_apart() {
        let docs = load_documents(&vec![sample_document()]).unwrap();
        let doc = &docs[0];

        assert_eq!(doc.mentions.len(), 2);
        assert_eq!(doc.relations.len(), 1);
        assert_eq!(doc.mentions[0].id.as_deref(), Some("D008094"));
        assert_eq!(doc.mentions[1].id, None);
        assert_eq!(doc.relations[0].document_id, "1000");
        assert_eq!(doc.relations[0].object_id.as_deref(), Some("188450"));
    }

    #[test]
    fn test_read_json_lines() {
        let input = r#"{"docid":"1","title":"T","abstract":"A","mentions":[{"mention":"x","entity_type":"Gene","entity_ids":["id:1017"],"ch_start":0,"ch_end":1}]}

{"docid":"2"}
"#;
        let docs = JsonLinesAdapter::read(input.as_bytes()).unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].mentions[0].entity_ids, vec!["id:1017".to_string()]);
        assert!(docs[1].mentions.is_empty());
        assert!(docs[1].title.is_empty());
    }

    #[test]
    fn test_read_invalid_json() {
        let err = JsonLinesAdapter::read("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_missing_adapter_file() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = JsonLinesAdapter::new(dir.path().join("train_docs.jsonl"));
        assert!(matches!(adapter.documents(), Err(Error::MissingFile(_))));
    }
}
