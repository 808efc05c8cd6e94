#![forbid(unsafe_code)]

use mc_core::model::NormalizedName;
use mc_storage::{SEARCH_RESULT_CAP, SqliteStore};
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
fn short_queries_return_empty() {
    let dir = temp_dir("short_queries_return_empty");
    let mut store = SqliteStore::open(&dir).expect("open store");
    store
        .ingest_designs(&[entry("Baby", "Baby")])
        .expect("ingest");

    assert!(store.search("", None).expect("search").is_empty());
    assert!(store.search("B", None).expect("search").is_empty());
    assert_eq!(store.search("Ba", None).expect("search").len(), 1);
}

#[test]
fn matches_are_case_insensitive_on_both_names() {
    let dir = temp_dir("matches_are_case_insensitive_on_both_names");
    let mut store = SqliteStore::open(&dir).expect("open store");
    store
        .ingest_designs(&[entry("Teacher-Life", "Teacher Life")])
        .expect("ingest");

    // Raw name hit.
    assert_eq!(store.search("teacher-li", None).expect("search").len(), 1);
    // Clean name hit.
    assert_eq!(store.search("TEACHER LIFE", None).expect("search").len(), 1);
    assert!(store.search("principal", None).expect("search").is_empty());
}

#[test]
fn like_wildcards_in_queries_match_literally() {
    let dir = temp_dir("like_wildcards_in_queries_match_literally");
    let mut store = SqliteStore::open(&dir).expect("open store");
    store
        .ingest_designs(&[entry("My_Cat", "My Cat"), entry("MyXCat", "MyXCat")])
        .expect("ingest");

    let hits = store.search("y_c", None).expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "My_Cat");
    assert!(store.search("%cat", None).expect("search").is_empty());
}

#[test]
fn results_are_capped() {
    let dir = temp_dir("results_are_capped");
    let mut store = SqliteStore::open(&dir).expect("open store");
    let entries: Vec<NormalizedName> = (0..60)
        .map(|i| entry(&format!("Sports-{i:02}"), &format!("Sports {i:02}")))
        .collect();
    store.ingest_designs(&entries).expect("ingest");

    let hits = store.search("sports", None).expect("search");
    assert_eq!(hits.len(), SEARCH_RESULT_CAP);
}

#[test]
fn exclude_niche_filters_assigned_designs() {
    let dir = temp_dir("exclude_niche_filters_assigned_designs");
    let mut store = SqliteStore::open(&dir).expect("open store");
    let created = store
        .ingest_designs(&[entry("Sports Mom", "Sports Mom"), entry("Sports Dad", "Sports Dad")])
        .expect("ingest");
    let niche = store.create_niche("Sports", None).expect("create niche");
    store.assign(&created[0].id, &niche.id).expect("assign");

    let hits = store.search("sports", Some(&niche.id)).expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Sports Dad");

    let unfiltered = store.search("sports", None).expect("search");
    assert_eq!(unfiltered.len(), 2);
}
