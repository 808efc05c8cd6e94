#![forbid(unsafe_code)]

use crate::{CatalogService, Design, DuplicateDesign, ServiceError};

impl CatalogService {
    pub fn list_designs(&self) -> Result<Vec<Design>, ServiceError> {
        Ok(self
            .store
            .list_designs()?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub fn unassigned(&self) -> Result<Vec<Design>, ServiceError> {
        Ok(self
            .store
            .unassigned_designs()?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub fn duplicates(&self) -> Result<Vec<DuplicateDesign>, ServiceError> {
        Ok(self
            .store
            .duplicate_designs()?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub fn search(
        &self,
        query: &str,
        exclude_niche: Option<&str>,
    ) -> Result<Vec<Design>, ServiceError> {
        Ok(self
            .store
            .search(query, exclude_niche)?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
