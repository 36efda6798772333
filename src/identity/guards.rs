use std::sync::Arc;

use tracing::debug;

use super::authorizer::{decide, AccessDecision};
use super::principal::Principal;
use super::request_context::RequestContext;
use super::resolver::{AccessError, IdentityService, ProfileStore};
use super::role::{Role, ADMIN_ROLES};

/// Principal and role handed to the caller once the admin gate passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    pub principal: Principal,
    pub role: Role,
}

/// Page-guard outcome: either the caller proceeds with an [`AdminContext`]
/// or it navigates to the given path instead of rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminGate {
    Granted(AdminContext),
    Redirect(String),
}

/// Single policy point for the admin area. All three adapters route through
/// the same resolve -> lookup -> decide pipeline, so the required-role set
/// and the unknown-role-is-denied rule are defined exactly once.
#[derive(Clone)]
pub struct AccessGate {
    identity: Arc<dyn IdentityService>,
    profiles: Arc<dyn ProfileStore>,
    login_path: String,
    fallback_path: String,
}

impl AccessGate {
    pub fn new(identity: Arc<dyn IdentityService>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            identity,
            profiles,
            login_path: "/login".to_string(),
            fallback_path: "/".to_string(),
        }
    }

    pub fn with_paths(
        mut self,
        login_path: impl Into<String>,
        fallback_path: impl Into<String>,
    ) -> Self {
        self.login_path = login_path.into();
        self.fallback_path = fallback_path.into();
        self
    }

    /// Sequential resolution pipeline: identity first, then role, since the
    /// profile lookup needs the principal id. Nothing is cached within or
    /// across calls; a role revoked mid-session is reflected on the very
    /// next check.
    async fn resolve(
        &self,
        ctx: &RequestContext,
    ) -> Result<(Option<Principal>, Option<Role>), AccessError> {
        let principal = self.identity.current_principal(ctx).await?;
        let role = match principal.as_ref() {
            Some(p) => self.profiles.role_for(&p.id).await?,
            None => None,
        };
        Ok((principal, role))
    }

    /// Page-level guard for contexts that render a full page and can abort
    /// rendering via navigation. Anonymous callers are sent to login with the
    /// original target encoded for post-login return; authenticated but
    /// unprivileged callers are sent to the fallback path, which stays
    /// silent about why access was denied.
    pub async fn require_admin(
        &self,
        ctx: &RequestContext,
        original_path: &str,
    ) -> Result<AdminGate, AccessError> {
        let (principal, role) = self.resolve(ctx).await?;
        match (decide(principal.as_ref(), role, ADMIN_ROLES), principal) {
            (AccessDecision::Allowed(role), Some(principal)) => {
                Ok(AdminGate::Granted(AdminContext { principal, role }))
            }
            (AccessDecision::Allowed(_), None) | (AccessDecision::DeniedAnonymous, _) => {
                debug!(target: "authz", "admin gate: anonymous, next={}", original_path);
                Ok(AdminGate::Redirect(format!(
                    "{}?next={}",
                    self.login_path,
                    urlencoding::encode(original_path)
                )))
            }
            (AccessDecision::DeniedInsufficientRole(role), _) => {
                debug!(target: "authz", "admin gate: insufficient role {:?}", role);
                Ok(AdminGate::Redirect(self.fallback_path.clone()))
            }
        }
    }

    /// Action-level guard: the caller keeps executing and shapes its own
    /// denial response. `true` only on an allowed decision; collaborator
    /// failures propagate as `Err`, distinguishable from a clean `false`.
    pub async fn check_admin_role(&self, ctx: &RequestContext) -> Result<bool, AccessError> {
        let (principal, role) = self.resolve(ctx).await?;
        Ok(matches!(
            decide(principal.as_ref(), role, ADMIN_ROLES),
            AccessDecision::Allowed(_)
        ))
    }

    /// Resolved role for UI personalization. Skips the required-set check;
    /// callers must not gate privileged actions on this value.
    pub async fn current_role(&self, ctx: &RequestContext) -> Result<Option<Role>, AccessError> {
        let (_, role) = self.resolve(ctx).await?;
        Ok(role)
    }
}
