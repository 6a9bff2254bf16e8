//! Café use-case service.
//!
//! # Responsibility
//! - Expose list/create/update/delete for the routing layer.
//! - Validate ids and fields before a unit is opened.
//!
//! # Invariants
//! - Validation failures never reach the repository.
//! - Uniqueness is left to the repository's unit; this layer does not
//!   pre-check it.

use crate::model::cafe::{Cafe, CafeDraft, CafeSummary, DeletedCafe};
use crate::repo::cafe_repo::CafeRepository;
use crate::repo::Entity;
use crate::service::error::{ServiceError, ServiceResult};
use crate::validation::{parse_cafe_id, validate_cafe_draft};
use log::debug;

/// Café service facade over repository implementations.
pub struct CafeService<R: CafeRepository> {
    repo: R,
}

impl<R: CafeRepository> CafeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists cafés by descending employee count.
    ///
    /// `location` is a case-insensitive substring filter; no match yields an
    /// empty list.
    pub fn list_cafes(&self, location: Option<&str>) -> ServiceResult<Vec<CafeSummary>> {
        self.repo.list_cafes(location).map_err(Into::into)
    }

    /// Loads one café by external id.
    pub fn get_cafe(&self, cafe_id: &str) -> ServiceResult<Cafe> {
        let cafe_id = parse_cafe_id(cafe_id)?;
        self.repo
            .get_cafe(cafe_id)?
            .ok_or_else(|| ServiceError::NotFound {
                entity: Entity::Cafe,
                id: cafe_id.to_string(),
            })
    }

    pub fn create_cafe(&self, draft: &CafeDraft) -> ServiceResult<Cafe> {
        let draft = check_draft(draft)?;
        self.repo.create_cafe(&draft).map_err(Into::into)
    }

    pub fn update_cafe(&self, cafe_id: &str, draft: &CafeDraft) -> ServiceResult<Cafe> {
        let cafe_id = parse_cafe_id(cafe_id)?;
        let draft = check_draft(draft)?;
        self.repo.update_cafe(cafe_id, &draft).map_err(Into::into)
    }

    /// Deletes one café; its employees stay but lose the assignment.
    pub fn delete_cafe(&self, cafe_id: &str) -> ServiceResult<DeletedCafe> {
        let cafe_id = parse_cafe_id(cafe_id)?;
        self.repo.delete_cafe(cafe_id).map_err(Into::into)
    }
}

fn check_draft(draft: &CafeDraft) -> ServiceResult<CafeDraft> {
    validate_cafe_draft(draft).map_err(|err| {
        debug!(
            "event=cafe_validate module=service status=rejected failures={}",
            err.messages.len()
        );
        err.into()
    })
}
