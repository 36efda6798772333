use async_trait::async_trait;
use thiserror::Error;

use super::principal::Principal;
use super::request_context::RequestContext;
use super::role::Role;

/// External collaborator failures. These are never a denial: callers must
/// keep them distinct from "no access" so an outage surfaces as a generic
/// error state instead of silently locking legitimate users out.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("identity service unavailable: {0}")]
    IdentityUnavailable(String),
    #[error("profile lookup failed: {0}")]
    ProfileLookupFailed(String),
}

/// Session/identity collaborator. Owned by the hosted backend; this crate
/// only reads from it.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve the current authenticated principal, or `None` when the
    /// request carries no live session. Absence is a normal outcome, not an
    /// error; only transport-level failures return `Err`.
    async fn current_principal(
        &self,
        ctx: &RequestContext,
    ) -> Result<Option<Principal>, AccessError>;
}

/// Profile/role collaborator, queried by exact principal-id match.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Role recorded for the principal, or `None` when no profile row exists
    /// or the stored value does not parse to a known role.
    async fn role_for(&self, principal_id: &str) -> Result<Option<Role>, AccessError>;
}
