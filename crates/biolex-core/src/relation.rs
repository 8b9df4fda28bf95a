use serde::{Deserialize, Serialize};

/// Second field of a chemical-induced-disease line.
pub const CID_MARKER: &str = "CID";

/// Chemical-induced-disease relation from an annotation corpus.
///
/// Serialized with the column names of the exported relation table
/// (`number`, `chemical`, `disease`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    #[serde(rename = "number")]
    pub document_id: String,
    #[serde(rename = "chemical")]
    pub subject_id: String,
    #[serde(rename = "disease")]
    pub object_id: String,
}

impl Relation {
    #[must_use]
    pub fn new(
        document_id: impl Into<String>,
        subject_id: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            subject_id: subject_id.into(),
            object_id: object_id.into(),
        }
    }
}

/// Typed, labelled relation supplied by the CTD adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtdRelation {
    pub document_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    pub subject_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    pub object_type: String,
}
