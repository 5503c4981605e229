//! User repository

use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::user::{self, ROLE_ADMIN, ROLE_INSTRUCTOR, ROLE_STUDENT, ROLE_SYSTEM_ADMIN};
use crate::repositories::scoped::ScopedRepository;
use crate::tenant::TenantContext;

/// Request data for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: String,
    pub role: String,
}

/// Repository for user database operations
pub struct UserRepository<'a, C> {
    repo: ScopedRepository<'a, C, user::Entity>,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(conn: &'a C, scope: &'a TenantContext) -> Self {
        Self {
            repo: ScopedRepository::new(conn, scope, "user"),
        }
    }

    /// Creates a user. A duplicate email surfaces as Conflict.
    pub async fn create(&self, request: CreateUserRequest) -> Result<user::Model, RepositoryError> {
        validate_email(&request.email)?;
        validate_role(&request.role)?;
        if request.display_name.trim().is_empty() {
            return Err(RepositoryError::validation("display name cannot be empty"));
        }

        let model = user::ActiveModel {
            email: Set(request.email.trim().to_lowercase()),
            display_name: Set(request.display_name.trim().to_string()),
            role: Set(request.role),
            ..Default::default()
        };
        self.repo.insert(model).await
    }

    pub async fn get(&self, id: Uuid) -> Result<user::Model, RepositoryError> {
        self.repo.require(id, false).await
    }

    /// Email lookup within tenant scope.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<user::Model>, RepositoryError> {
        self.repo
            .find_one(
                Condition::all().add(user::Column::Email.eq(email.trim().to_lowercase())),
                false,
            )
            .await
    }

    pub async fn list(&self) -> Result<Vec<user::Model>, RepositoryError> {
        self.repo
            .get_all(Some(user::Column::Email), false, false)
            .await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repo.remove(id).await
    }
}

fn validate_email(email: &str) -> Result<(), RepositoryError> {
    let trimmed = email.trim();
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(RepositoryError::Validation(format!(
            "'{trimmed}' is not a valid email address"
        )));
    }
    Ok(())
}

fn validate_role(role: &str) -> Result<(), RepositoryError> {
    match role {
        ROLE_STUDENT | ROLE_INSTRUCTOR | ROLE_ADMIN | ROLE_SYSTEM_ADMIN => Ok(()),
        other => Err(RepositoryError::Validation(format!(
            "unknown role '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("student@example.com").is_ok());
        assert!(validate_email(" padded@example.org ").is_ok());
        assert!(validate_email("missing-at.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
    }

    #[test]
    fn role_validation() {
        for role in [ROLE_STUDENT, ROLE_INSTRUCTOR, ROLE_ADMIN, ROLE_SYSTEM_ADMIN] {
            assert!(validate_role(role).is_ok());
        }
        assert!(validate_role("superuser").is_err());
    }
}
