#![forbid(unsafe_code)]

use crate::{CatalogService, NicheCount, NicheShare, ServiceError, StatsReport};
use mc_core::stats::percent;

impl CatalogService {
    /// Coverage and distribution over the whole catalog. Pure read; niches
    /// are ordered by descending design count with a stable sort so ties
    /// keep creation order.
    pub fn stats(&self) -> Result<StatsReport, ServiceError> {
        let designs = self.store.list_designs()?;
        let mut niches = self.store.list_niches()?;
        let unassigned = self.store.unassigned_designs()?;

        let total_designs = designs.len();
        let assigned_count = total_designs - unassigned.len();
        niches.sort_by(|a, b| b.design_count.cmp(&a.design_count));

        let top_niches = niches
            .iter()
            .take(3)
            .map(|summary| NicheCount {
                id: summary.niche.id.clone(),
                name: summary.niche.name.clone(),
                count: summary.design_count,
            })
            .collect();
        let niche_distribution = niches
            .iter()
            .map(|summary| NicheShare {
                id: summary.niche.id.clone(),
                name: summary.niche.name.clone(),
                count: summary.design_count,
                percentage: percent(summary.design_count as usize, total_designs),
            })
            .collect();

        Ok(StatsReport {
            total_designs,
            total_niches: niches.len(),
            unassigned_count: unassigned.len(),
            assigned_count,
            coverage_percent: percent(assigned_count, total_designs),
            top_niches,
            niche_distribution,
        })
    }
}
