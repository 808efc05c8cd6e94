#![forbid(unsafe_code)]

use mc_storage::{
    AssignedDesignRow, DesignRow, DuplicateDesignRow, NicheDetailRow, NicheRow, NicheSummaryRow,
};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub id: String,
    pub name: String,
    pub clean_name: String,
    pub created_at_ms: i64,
}

impl From<DesignRow> for Design {
    fn from(row: DesignRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            clean_name: row.clean_name,
            created_at_ms: row.created_at_ms,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Niche {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at_ms: i64,
}

impl From<NicheRow> for Niche {
    fn from(row: NicheRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at_ms: row.created_at_ms,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NicheSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at_ms: i64,
    pub design_count: i64,
}

impl From<NicheSummaryRow> for NicheSummary {
    fn from(row: NicheSummaryRow) -> Self {
        Self {
            id: row.niche.id,
            name: row.niche.name,
            description: row.niche.description,
            created_at_ms: row.niche.created_at_ms,
            design_count: row.design_count,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedDesign {
    pub design: Design,
    pub assigned_at_ms: i64,
}

impl From<AssignedDesignRow> for AssignedDesign {
    fn from(row: AssignedDesignRow) -> Self {
        Self {
            design: row.design.into(),
            assigned_at_ms: row.assigned_at_ms,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NicheDetail {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at_ms: i64,
    pub designs: Vec<AssignedDesign>,
}

impl From<NicheDetailRow> for NicheDetail {
    fn from(row: NicheDetailRow) -> Self {
        Self {
            id: row.niche.id,
            name: row.niche.name,
            description: row.niche.description,
            created_at_ms: row.niche.created_at_ms,
            designs: row.designs.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateDesign {
    pub design: Design,
    pub niches: Vec<String>,
}

impl From<DuplicateDesignRow> for DuplicateDesign {
    fn from(row: DuplicateDesignRow) -> Self {
        Self {
            design: row.design.into(),
            niches: row.niche_names,
        }
    }
}

/// Counts reported by bulk import: `processed` is every trimmed non-empty
/// input line (pre-dedup), `existing = processed - added`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStats {
    pub processed: usize,
    pub added: usize,
    pub existing: usize,
}

/// Outcome of bulk assignment: names that resolved to existing designs and
/// names that were created on the fly. Every reported name ends up assigned.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignReport {
    pub assigned: Vec<String>,
    pub created: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NicheCount {
    pub id: String,
    pub name: String,
    pub count: i64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NicheShare {
    pub id: String,
    pub name: String,
    pub count: i64,
    pub percentage: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_designs: usize,
    pub total_niches: usize,
    pub unassigned_count: usize,
    pub assigned_count: usize,
    pub coverage_percent: u32,
    pub top_niches: Vec<NicheCount>,
    pub niche_distribution: Vec<NicheShare>,
}
