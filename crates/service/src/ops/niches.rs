#![forbid(unsafe_code)]

use crate::{CatalogService, Niche, NicheDetail, NicheSummary, ServiceError};

impl CatalogService {
    pub fn create_niche(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Niche, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("niche name is required"));
        }
        Ok(self.store.create_niche(name, description)?.into())
    }

    pub fn list_niches(&self) -> Result<Vec<NicheSummary>, ServiceError> {
        Ok(self
            .store
            .list_niches()?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub fn niche_detail(&self, niche_id: &str) -> Result<NicheDetail, ServiceError> {
        self.store
            .get_niche(niche_id)?
            .map(Into::into)
            .ok_or(ServiceError::NotFound("niche"))
    }
}
