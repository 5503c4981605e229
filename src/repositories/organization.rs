//! Organization repository
//!
//! Organizations are managed by system admins; the handler layer enforces
//! that, so the scoped repository here usually runs with an admin context
//! whose organization clause is empty.

use sea_orm::{ConnectionTrait, Set};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::organization;
use crate::repositories::scoped::ScopedRepository;
use crate::tenant::TenantContext;

/// Request data for creating a new organization
#[derive(Debug, Clone)]
pub struct CreateOrganizationRequest {
    pub name: String,
}

/// Repository for organization database operations
pub struct OrganizationRepository<'a, C> {
    repo: ScopedRepository<'a, C, organization::Entity>,
}

impl<'a, C: ConnectionTrait> OrganizationRepository<'a, C> {
    pub fn new(conn: &'a C, scope: &'a TenantContext) -> Self {
        Self {
            repo: ScopedRepository::new(conn, scope, "organization"),
        }
    }

    pub async fn create(
        &self,
        request: CreateOrganizationRequest,
    ) -> Result<organization::Model, RepositoryError> {
        validate_name(&request.name)?;

        let model = organization::ActiveModel {
            name: Set(request.name.trim().to_string()),
            ..Default::default()
        };
        self.repo.insert(model).await
    }

    pub async fn get(&self, id: Uuid) -> Result<organization::Model, RepositoryError> {
        self.repo.require(id, false).await
    }

    pub async fn list(&self) -> Result<Vec<organization::Model>, RepositoryError> {
        self.repo
            .get_all(Some(organization::Column::Name), false, false)
            .await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repo.remove(id).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repo.restore(id).await
    }
}

fn validate_name(name: &str) -> Result<(), RepositoryError> {
    if name.trim().is_empty() {
        return Err(RepositoryError::validation(
            "organization name cannot be empty",
        ));
    }
    if name.len() > 255 {
        return Err(RepositoryError::validation(
            "organization name cannot exceed 255 characters",
        ));
    }
    Ok(())
}
