//! # Organization API Handlers
//!
//! Organization management is restricted to system admins; any other
//! context receives 403 before the repository is touched.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, forbidden};
use crate::models::organization;
use crate::repositories::{CreateOrganizationRequest, OrganizationRepository};
use crate::server::AppState;
use crate::tenant::TenantContext;

/// Request payload for creating an organization
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrganizationDto {
    /// Display name (required, max 255 characters)
    #[schema(example = "Acme University")]
    pub name: String,
}

/// Organization representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDto {
    pub id: Uuid,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<organization::Model> for OrganizationDto {
    fn from(model: organization::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

fn require_system_admin(context: &TenantContext) -> Result<(), ApiError> {
    if context.is_system_admin {
        Ok(())
    } else {
        Err(forbidden(Some("Organization management requires a system admin")))
    }
}

/// Create an organization
#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    security(("bearer_auth" = [])),
    request_body = CreateOrganizationDto,
    responses(
        (status = 201, description = "Organization created", body = OrganizationDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Not a system admin", body = ApiError)
    ),
    tag = "organizations"
)]
pub async fn create_organization(
    State(state): State<AppState>,
    context: TenantContext,
    Json(request): Json<CreateOrganizationDto>,
) -> Result<(StatusCode, Json<OrganizationDto>), ApiError> {
    require_system_admin(&context)?;

    let repo = OrganizationRepository::new(&state.db, &context);
    let created = repo
        .create(CreateOrganizationRequest { name: request.name })
        .await?;
    counter!("organizations_created_total").increment(1);

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List organizations
#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Organizations", body = [OrganizationDto]),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Not a system admin", body = ApiError)
    ),
    tag = "organizations"
)]
pub async fn list_organizations(
    State(state): State<AppState>,
    context: TenantContext,
) -> Result<Json<Vec<OrganizationDto>>, ApiError> {
    require_system_admin(&context)?;

    let repo = OrganizationRepository::new(&state.db, &context);
    let organizations = repo.list().await?;
    Ok(Json(organizations.into_iter().map(Into::into).collect()))
}

/// Get an organization by id
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Organization UUID")),
    responses(
        (status = 200, description = "Organization", body = OrganizationDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Not a system admin", body = ApiError),
        (status = 404, description = "Organization not found", body = ApiError)
    ),
    tag = "organizations"
)]
pub async fn get_organization(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizationDto>, ApiError> {
    require_system_admin(&context)?;

    let repo = OrganizationRepository::new(&state.db, &context);
    let organization = repo.get(id).await?;
    Ok(Json(organization.into()))
}
