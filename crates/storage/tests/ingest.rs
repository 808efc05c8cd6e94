#![forbid(unsafe_code)]

use mc_core::model::NormalizedName;
use mc_core::normalize::normalize_line;
use mc_storage::SqliteStore;
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("mc_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn entry(name: &str, clean_name: &str) -> NormalizedName {
    NormalizedName {
        name: name.to_string(),
        clean_name: clean_name.to_string(),
    }
}

#[test]
fn ingest_is_idempotent_by_name() {
    let dir = temp_dir("ingest_is_idempotent_by_name");
    let mut store = SqliteStore::open(&dir).expect("open store");

    let first = store
        .ingest_designs(&[entry("Baby", "Baby")])
        .expect("first ingest");
    assert_eq!(first.len(), 1);

    let second = store
        .ingest_designs(&[entry("Baby", "Baby")])
        .expect("second ingest");
    assert!(second.is_empty());

    assert_eq!(store.list_designs().expect("list").len(), 1);
}

#[test]
fn extension_variants_dedup_to_one_design() {
    let dir = temp_dir("extension_variants_dedup_to_one_design");
    let mut store = SqliteStore::open(&dir).expect("open store");

    let entries = vec![normalize_line("Baby.png"), normalize_line("Baby.jpg")];
    let created = store.ingest_designs(&entries).expect("ingest");

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name, "Baby");
}

#[test]
fn batch_reports_only_new_rows() {
    let dir = temp_dir("batch_reports_only_new_rows");
    let mut store = SqliteStore::open(&dir).expect("open store");

    store
        .ingest_designs(&[entry("Baby", "Baby")])
        .expect("seed ingest");
    let created = store
        .ingest_designs(&[
            entry("Baby", "Baby"),
            entry("Teacher-Life", "Teacher Life"),
            entry("Teacher-Life", "Teacher Life"),
        ])
        .expect("batch ingest");

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name, "Teacher-Life");
    assert_eq!(created[0].clean_name, "Teacher Life");
}

#[test]
fn designs_survive_reopen() {
    let dir = temp_dir("designs_survive_reopen");
    {
        let mut store = SqliteStore::open(&dir).expect("open store");
        store
            .ingest_designs(&[entry("Baby", "Baby")])
            .expect("ingest");
    }

    let store = SqliteStore::open(&dir).expect("reopen store");
    let designs = store.list_designs().expect("list");
    assert_eq!(designs.len(), 1);
    assert_eq!(designs[0].name, "Baby");
    assert_eq!(
        store
            .get_design_by_name("Baby")
            .expect("lookup")
            .expect("present")
            .id,
        designs[0].id
    );
}
