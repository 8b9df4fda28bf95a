use tracing::trace;

use super::parser::LineParser;
use crate::error::{Error, Result};
use crate::relation::{Relation, CID_MARKER};

const RELATION_MARKER: &str = "\tCID\t";

/// Extracts chemical-induced-disease relations from an annotation corpus.
///
/// Only lines containing a tab delimited `CID` marker are considered. Unlike
/// entity annotations, a marked line that is not exactly
/// `id<TAB>CID<TAB>chemical<TAB>disease` is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationExtractor;

impl RelationExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LineParser for RelationExtractor {
    type Output = Vec<Relation>;

    fn parse_line(&self, relations: &mut Vec<Relation>, line_no: usize, line: &str) -> Result<()> {
        if !line.contains(RELATION_MARKER) {
            return Ok(());
        }

        let fields: Vec<&str> = line.trim().split('\t').collect();
        match fields.as_slice() {
            &[document_id, CID_MARKER, subject_id, object_id] => {
                trace!(line = line_no, document_id, "relation");
                relations.push(Relation::new(document_id, subject_id, object_id));
                Ok(())
            }
            &[_, marker, _, _] => Err(Error::MalformedRelation {
                line: line_no,
                reason: format!("expected '{CID_MARKER}' as second field, found '{marker}'"),
            }),
            _ => Err(Error::MalformedRelation {
                line: line_no,
                reason: format!("expected 4 tab separated fields, found {}", fields.len()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_relation() {
        let lines = [
            "100|t|Drug causes disease",
            "100|a|Aspirin induces bleeding.",
            "100\t0\t7\tAspirin\tChemical\tD001241",
            "100\t17\t25\tbleeding\tDisease\tD001769",
            "100\tCID\tD001241\tD001769",
        ];
        let relations = RelationExtractor::new().parse_lines(lines).unwrap();

        assert_eq!(relations, vec![Relation::new("100", "D001241", "D001769")]);
    }

    #[test]
    fn test_order_kept_without_dedup() {
        let lines = [
            "2\tCID\tC2\tD2",
            "1\tCID\tC1\tD1",
            "2\tCID\tC2\tD2",
        ];
        let relations = RelationExtractor::new().parse_lines(lines).unwrap();

        let docs: Vec<&str> = relations.iter().map(|r| r.document_id.as_str()).collect();
        assert_eq!(docs, vec!["2", "1", "2"]);
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let relations = RelationExtractor::new()
            .parse_str("3\tCID\tC3\tD3  \r\n")
            .unwrap();
        assert_eq!(relations[0].object_id, "D3");
    }

    #[test]
    fn test_extra_field_is_fatal() {
        let err = RelationExtractor::new()
            .parse_lines(["1|t|T", "1\tCID\tC1\tD1\tpredicted"])
            .unwrap_err();
        assert!(matches!(err, Error::MalformedRelation { line: 2, .. }));
    }

    #[test]
    fn test_marker_in_wrong_position_is_fatal() {
        let err = RelationExtractor::new()
            .parse_lines(["1\tC1\tCID\tD1"])
            .unwrap_err();
        assert!(matches!(err, Error::MalformedRelation { line: 1, .. }));
    }

    #[test]
    fn test_unmarked_lines_ignored() {
        let relations = RelationExtractor::new()
            .parse_lines(["1|t|CID in a title", "1\t0\t4\tCIDX\tChemical\tD1"])
            .unwrap();
        assert!(relations.is_empty());
    }
}
