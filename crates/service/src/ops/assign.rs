#![forbid(unsafe_code)]

use crate::{BulkAssignReport, CatalogService, ServiceError};
use mc_core::model::NormalizedName;
use mc_core::normalize;
use mc_storage::StoreError;
use std::collections::HashSet;

impl CatalogService {
    /// Idempotent single assignment; returns whether the relation changed.
    pub fn assign(&mut self, design_id: &str, niche_id: &str) -> Result<bool, ServiceError> {
        map_unknown_id(self.store.assign(design_id, niche_id))
    }

    /// Idempotent single unassignment; returns whether the relation changed.
    pub fn unassign(&mut self, design_id: &str, niche_id: &str) -> Result<bool, ServiceError> {
        map_unknown_id(self.store.unassign(design_id, niche_id))
    }

    /// Attaches a pasted list of names to a niche in three explicit steps:
    /// resolve each line against existing designs, ingest the misses as new
    /// designs, then assign every resolved or created id. Nothing is silently
    /// dropped; the report says which names matched and which were created.
    pub fn assign_bulk(
        &mut self,
        niche_id: &str,
        raw_text: &str,
    ) -> Result<BulkAssignReport, ServiceError> {
        if raw_text.trim().is_empty() {
            return Err(ServiceError::Validation("rawText is required"));
        }
        if self.store.get_niche(niche_id)?.is_none() {
            return Err(ServiceError::NotFound("niche"));
        }

        // Step 1: resolve. A line matches when its clean form equals an
        // existing design's name or clean name case-insensitively.
        let designs = self.store.list_designs()?;
        let mut to_assign: Vec<String> = Vec::new();
        let mut assigned: Vec<String> = Vec::new();
        let mut staged: Vec<NormalizedName> = Vec::new();

        for line in normalize::split_lines(raw_text) {
            let normalized = normalize::normalize_line(&line);
            let clean_lower = normalized.clean_name.to_lowercase();
            let hit = designs.iter().find(|design| {
                design.name.to_lowercase() == clean_lower
                    || design.clean_name.to_lowercase() == clean_lower
            });
            match hit {
                Some(design) => {
                    to_assign.push(design.id.clone());
                    assigned.push(design.name.clone());
                }
                None => staged.push(normalized),
            }
        }

        // Step 2: ingest the staged names. The store dedups by raw name, so
        // a staged line whose raw name already exists resolves to the stored
        // design instead of creating a twin.
        let mut created: Vec<String> = Vec::new();
        if !staged.is_empty() {
            let created_rows = self.store.ingest_designs(&staged)?;
            let created_names: HashSet<String> =
                created_rows.iter().map(|row| row.name.clone()).collect();
            for row in created_rows {
                to_assign.push(row.id.clone());
                created.push(row.name);
            }
            for entry in &staged {
                if created_names.contains(&entry.name) {
                    continue;
                }
                if let Some(row) = self.store.get_design_by_name(&entry.name)? {
                    to_assign.push(row.id);
                    assigned.push(row.name);
                }
            }
        }

        // Step 3: assign. Duplicate ids collapse on the idempotent relation.
        for design_id in &to_assign {
            self.store.assign(design_id, niche_id)?;
        }

        Ok(BulkAssignReport { assigned, created })
    }
}

fn map_unknown_id(result: Result<bool, StoreError>) -> Result<bool, ServiceError> {
    match result {
        Err(StoreError::UnknownId) => Err(ServiceError::NotFound("design or niche")),
        other => Ok(other?),
    }
}
