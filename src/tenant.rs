//! # Tenant Context
//!
//! The request-scoped tenant context resolved from verified identity
//! claims. It is created once per request by the auth middleware, never
//! mutated afterwards, and passed explicitly into every repository so the
//! scoping predicate stays testable in isolation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the acting user for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantContext {
    /// Acting user's identifier
    pub user_id: Uuid,
    /// Organization the user belongs to; `None` for system-level accounts
    pub organization_id: Option<Uuid>,
    /// Whether the actor is a system admin, exempt from tenant scoping
    pub is_system_admin: bool,
}

impl TenantContext {
    /// Context for a regular member of an organization.
    pub fn member(user_id: Uuid, organization_id: Uuid) -> Self {
        Self {
            user_id,
            organization_id: Some(organization_id),
            is_system_admin: false,
        }
    }

    /// Context for a system admin. Bypasses the organization predicate but
    /// still respects soft-delete filtering.
    pub fn system_admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            organization_id: None,
            is_system_admin: true,
        }
    }

    /// True iff repository queries must carry the organization clause:
    /// the actor is not a system admin and has an organization.
    pub fn applies_tenant_filter(&self) -> bool {
        !self.is_system_admin && self.organization_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_applies_tenant_filter() {
        let ctx = TenantContext::member(Uuid::new_v4(), Uuid::new_v4());
        assert!(ctx.applies_tenant_filter());
        assert!(!ctx.is_system_admin);
    }

    #[test]
    fn system_admin_bypasses_tenant_filter() {
        let ctx = TenantContext::system_admin(Uuid::new_v4());
        assert!(!ctx.applies_tenant_filter());
        assert!(ctx.is_system_admin);
    }

    #[test]
    fn orgless_non_admin_has_no_filter() {
        // The derived flag requires both a non-admin role and a present
        // organization; an org-less account emits no organization clause.
        let ctx = TenantContext {
            user_id: Uuid::new_v4(),
            organization_id: None,
            is_system_admin: false,
        };
        assert!(!ctx.applies_tenant_filter());
    }
}
