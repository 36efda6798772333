//! Admin gate scenario tests: page guard, action guard, and role accessor
//! across anonymous, unprivileged, privileged, and failing-backend paths.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use studyhall::identity::{
    AccessError, AccessGate, AdminContext, AdminGate, IdentityService, Principal, ProfileStore,
    RequestContext, Role,
};

struct FakeIdentity {
    principal: Option<Principal>,
    fail: bool,
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn current_principal(
        &self,
        _ctx: &RequestContext,
    ) -> Result<Option<Principal>, AccessError> {
        if self.fail {
            return Err(AccessError::IdentityUnavailable("connection refused".into()));
        }
        Ok(self.principal.clone())
    }
}

struct FakeProfiles {
    role: Option<Role>,
    fail: bool,
}

#[async_trait]
impl ProfileStore for FakeProfiles {
    async fn role_for(&self, _principal_id: &str) -> Result<Option<Role>, AccessError> {
        if self.fail {
            return Err(AccessError::ProfileLookupFailed("transport error".into()));
        }
        Ok(self.role)
    }
}

fn alice() -> Principal {
    Principal {
        id: "u-alice".into(),
        email: Some("alice@studyhall.test".into()),
    }
}

fn gate(principal: Option<Principal>, role: Option<Role>) -> AccessGate {
    AccessGate::new(
        Arc::new(FakeIdentity { principal, fail: false }),
        Arc::new(FakeProfiles { role, fail: false }),
    )
}

fn ctx() -> RequestContext {
    RequestContext {
        access_token: Some("tok".into()),
        request_id: None,
    }
}

#[tokio::test]
async fn anonymous_caller_is_redirected_to_login_with_return_target() -> Result<()> {
    let g = gate(None, None);
    let out = g.require_admin(&ctx(), "/admin").await?;
    assert_eq!(out, AdminGate::Redirect("/login?next=%2Fadmin".to_string()));
    Ok(())
}

#[tokio::test]
async fn unprivileged_role_is_redirected_to_fallback_not_login() -> Result<()> {
    let g = gate(Some(alice()), Some(Role::User));
    let out = g.require_admin(&ctx(), "/admin").await?;
    assert_eq!(out, AdminGate::Redirect("/".to_string()));
    Ok(())
}

#[tokio::test]
async fn admin_passes_the_page_guard() -> Result<()> {
    let g = gate(Some(alice()), Some(Role::Admin));
    let out = g.require_admin(&ctx(), "/admin").await?;
    assert_eq!(
        out,
        AdminGate::Granted(AdminContext {
            principal: alice(),
            role: Role::Admin,
        })
    );
    Ok(())
}

#[tokio::test]
async fn super_admin_passes_the_page_guard() -> Result<()> {
    let g = gate(Some(alice()), Some(Role::SuperAdmin));
    match g.require_admin(&ctx(), "/admin").await? {
        AdminGate::Granted(admin) => assert_eq!(admin.role, Role::SuperAdmin),
        other => panic!("expected grant, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn configured_paths_are_honored() -> Result<()> {
    let g = gate(None, None).with_paths("/signin", "/home");
    let out = g.require_admin(&ctx(), "/admin/courses").await?;
    assert_eq!(
        out,
        AdminGate::Redirect("/signin?next=%2Fadmin%2Fcourses".to_string())
    );

    let g = gate(Some(alice()), Some(Role::Creator)).with_paths("/signin", "/home");
    let out = g.require_admin(&ctx(), "/admin/courses").await?;
    assert_eq!(out, AdminGate::Redirect("/home".to_string()));
    Ok(())
}

#[tokio::test]
async fn missing_profile_row_fails_the_boolean_guard() -> Result<()> {
    let g = gate(Some(alice()), None);
    assert!(!g.check_admin_role(&ctx()).await?);
    Ok(())
}

#[tokio::test]
async fn boolean_guard_matches_page_guard_policy() -> Result<()> {
    assert!(!gate(None, None).check_admin_role(&ctx()).await?);
    assert!(!gate(Some(alice()), Some(Role::User)).check_admin_role(&ctx()).await?);
    assert!(!gate(Some(alice()), Some(Role::Creator)).check_admin_role(&ctx()).await?);
    assert!(gate(Some(alice()), Some(Role::Admin)).check_admin_role(&ctx()).await?);
    assert!(gate(Some(alice()), Some(Role::SuperAdmin)).check_admin_role(&ctx()).await?);
    Ok(())
}

#[tokio::test]
async fn profile_store_failure_is_not_a_denial() {
    let g = AccessGate::new(
        Arc::new(FakeIdentity { principal: Some(alice()), fail: false }),
        Arc::new(FakeProfiles { role: None, fail: true }),
    );
    let err = g
        .check_admin_role(&ctx())
        .await
        .expect_err("store failure must not resolve to a boolean");
    assert!(matches!(err, AccessError::ProfileLookupFailed(_)));

    // The page guard propagates the same failure instead of redirecting
    let err = g
        .require_admin(&ctx(), "/admin")
        .await
        .expect_err("store failure must not redirect");
    assert!(matches!(err, AccessError::ProfileLookupFailed(_)));
}

#[tokio::test]
async fn identity_service_failure_propagates_distinctly() {
    let g = AccessGate::new(
        Arc::new(FakeIdentity { principal: None, fail: true }),
        Arc::new(FakeProfiles { role: None, fail: false }),
    );
    let err = g
        .require_admin(&ctx(), "/admin")
        .await
        .expect_err("identity outage must not look like anonymous access");
    assert!(matches!(err, AccessError::IdentityUnavailable(_)));
}

#[tokio::test]
async fn role_accessor_returns_unprivileged_roles() -> Result<()> {
    let g = gate(Some(alice()), Some(Role::Creator));
    assert_eq!(g.current_role(&ctx()).await?, Some(Role::Creator));
    Ok(())
}

#[tokio::test]
async fn role_accessor_is_none_for_anonymous_and_missing_rows() -> Result<()> {
    assert_eq!(gate(None, None).current_role(&ctx()).await?, None);
    assert_eq!(gate(Some(alice()), None).current_role(&ctx()).await?, None);
    Ok(())
}
