use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "100|t|Drug causes disease
100|a|Aspirin induces bleeding.
100\t0\t7\tAspirin\tChemical\tD001241
100\t17\t25\tbleeding\tDisease\tD001769
100\tCID\tD001241\tD001769

200|t|Tumors
200|a|aspirin and tumors
200\t0\t7\taspirin\tChemical\tD001241
200\t12\t18\ttumors\tDisease\tD009369|D009336
200\t12\t18\tmystery\tDisease\t-1
";

fn blx(dir: &Path) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("blx").into();
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("BIOLEX_DATA_DIR");
    cmd
}

/// Lay out a data directory with the sample as the BC5CDR test split.
/// The tempdir guard must be kept alive.
fn data_dir() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("bc5cdr/data/training");
    fs::create_dir_all(&dir).unwrap();
    let file = dir.join("CDR_TestSet.PubTator.txt");
    fs::write(&file, SAMPLE).unwrap();
    (tmp, file)
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    let mut cmd: Command = cargo_bin_cmd!("blx").into();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("blx"));
}

// --- Documents ---

#[test]
fn documents_from_path() {
    let (tmp, file) = data_dir();
    blx(tmp.path())
        .arg("documents")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"abstract\": \"Aspirin induces bleeding.\""))
        .stderr(predicate::str::contains("Parsed 2 documents, 5 mentions"));
}

#[test]
fn documents_from_split() {
    let (tmp, _file) = data_dir();
    blx(tmp.path())
        .args(["--data-dir", "."])
        .args(["documents", "--split", "test", "--lines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":\"200\""));
}

#[test]
fn documents_to_file() {
    let (tmp, file) = data_dir();
    let out = tmp.path().join("documents.json");
    blx(tmp.path())
        .arg("documents")
        .arg(&file)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let docs = json.as_array().unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["id"], "100");
    assert_eq!(docs[1]["entities"].as_array().unwrap().len(), 3);
}

#[test]
fn documents_requires_input() {
    let (tmp, _file) = data_dir();
    blx(tmp.path()).arg("documents").assert().failure();
}

#[test]
fn documents_malformed_offsets_fail() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("bad.txt");
    fs::write(&file, "1|t|T\n1\tzero\t7\tAspirin\tChemical\tD001241\n").unwrap();

    blx(tmp.path())
        .arg("documents")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed annotation on line 2"));
}

#[test]
fn documents_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    blx(tmp.path())
        .args(["documents", "absent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// --- Relations ---

#[test]
fn relations_csv() {
    let (tmp, file) = data_dir();
    blx(tmp.path())
        .arg("relations")
        .arg(&file)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::diff("number,chemical,disease\n100,D001241,D001769\n"));
}

#[test]
fn relations_malformed_line_fails() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("bad.txt");
    fs::write(&file, "1\tCID\tD001241\n").unwrap();

    blx(tmp.path())
        .arg("relations")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed relation on line 1"));
}

// --- Lookup ---

#[test]
fn lookup_to_file() {
    let (tmp, file) = data_dir();
    let out = tmp.path().join("lookup.csv");
    blx(tmp.path())
        .arg("lookup")
        .arg(&file)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Built 5 lookup rows"));

    let csv = fs::read_to_string(&out).unwrap();
    let mut lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.remove(0), "Text,Type,Mesh");
    lines.sort_unstable();
    assert_eq!(
        lines,
        vec![
            "Aspirin,Chemical,D001241",
            "Bleeding,Disease,D001769",
            "Mystery,Disease,Unknown",
            "Tumors,Disease,D009336",
            "Tumors,Disease,D009369",
        ]
    );
}

// --- CTD ---

#[test]
fn ctd_lookup_from_adapter_output() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("train_docs.jsonl");
    fs::write(
        &file,
        r#"{"docid":"1","title":"T","abstract":"A","mentions":[{"mention":"lithium","entity_type":"Chemical","entity_ids":["id:D008094"],"ch_start":0,"ch_end":7}]}"#,
    )
    .unwrap();

    blx(tmp.path())
        .arg("ctd")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("text,type,id\nLithium,Chemical,D008094\n"));
}

#[test]
fn ctd_writes_documents() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("train_docs.jsonl");
    fs::write(
        &file,
        r#"{"docid":"1","mentions":[{"mention":"lithium","entity_type":"Chemical","entity_ids":["id:D008094"],"ch_start":0,"ch_end":7}],"relations":[{"relation_label":"chem_disease:therapeutic","subj_eid":"D008094","subj_type":"Chemical","obj_eid":"OMIM:188450","obj_type":"Disease"}]}"#,
    )
    .unwrap();
    let out = tmp.path().join("docs.jsonl");

    blx(tmp.path())
        .arg("ctd")
        .arg(&file)
        .arg("--documents")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 1 documents"));

    let doc: serde_json::Value = serde_json::from_str(fs::read_to_string(&out).unwrap().trim()).unwrap();
    assert_eq!(doc["mentions"][0]["id"], "D008094");
    assert_eq!(doc["relations"][0]["object_id"], "188450");
    assert_eq!(doc["relations"][0]["document_id"], "1");
}

#[test]
fn ctd_strict_rejects_missing_id() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("train_docs.jsonl");
    fs::write(
        &file,
        r#"{"docid":"1","mentions":[{"mention":"lithium","entity_type":"Chemical","entity_ids":[],"ch_start":0,"ch_end":7}]}"#,
    )
    .unwrap();

    blx(tmp.path())
        .args(["ctd", "--strict"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing id"));
}

// --- Stats ---

#[test]
fn stats_reports_splits() {
    let (tmp, _file) = data_dir();
    blx(tmp.path())
        .args(["--data-dir", "."])
        .arg("stats")
        .assert()
        .success()
        .stderr(
            predicate::str::contains("Documents: 2")
                .and(predicate::str::contains("Relations: 1"))
                .and(predicate::str::contains("Training")),
        );
}

#[test]
fn stats_fails_without_corpora() {
    let tmp = TempDir::new().unwrap();
    blx(tmp.path())
        .args(["--data-dir", ".", "stats", "--split", "dev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no split could be processed"));
}
