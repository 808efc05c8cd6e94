#![forbid(unsafe_code)]

use crate::{CatalogService, ImportStats, ServiceError};
use mc_core::model::NormalizedName;
use mc_core::normalize;

impl CatalogService {
    /// Bulk design import from pasted text. Lines are trimmed, deduplicated
    /// (case-sensitive) and normalized before ingestion; `processed` counts
    /// the lines before dedup so the caller can see how much input collapsed.
    pub fn import_designs(&mut self, raw_text: &str) -> Result<ImportStats, ServiceError> {
        if raw_text.trim().is_empty() {
            return Err(ServiceError::Validation("rawText is required"));
        }

        let lines = normalize::split_lines(raw_text);
        let processed = lines.len();
        let distinct = normalize::dedup_lines(lines);
        let entries: Vec<NormalizedName> = distinct
            .iter()
            .map(|line| normalize::normalize_line(line))
            .collect();

        let added = self.store.ingest_designs(&entries)?.len();
        Ok(ImportStats {
            processed,
            added,
            existing: processed - added,
        })
    }
}
