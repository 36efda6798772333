use super::principal::Principal;
use super::role::Role;

/// Outcome of an authorization check. Computed per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed(Role),
    DeniedAnonymous,
    DeniedInsufficientRole(Option<Role>),
}

/// Classify (principal presence, resolved role) against the required role
/// set. Pure and total: no I/O, no logging, identical inputs always yield
/// identical decisions. Policy lives here exactly once; every guard adapter
/// routes through this function.
pub fn decide(
    principal: Option<&Principal>,
    role: Option<Role>,
    required: &[Role],
) -> AccessDecision {
    if principal.is_none() {
        return AccessDecision::DeniedAnonymous;
    }
    match role {
        Some(r) if required.contains(&r) => AccessDecision::Allowed(r),
        other => AccessDecision::DeniedInsufficientRole(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ADMIN_ROLES;

    fn principal() -> Principal {
        Principal {
            id: "u-1".into(),
            email: Some("u1@studyhall.test".into()),
        }
    }

    #[test]
    fn unprivileged_roles_are_denied() {
        let p = principal();
        for role in [Role::User, Role::Creator] {
            assert_eq!(
                decide(Some(&p), Some(role), ADMIN_ROLES),
                AccessDecision::DeniedInsufficientRole(Some(role))
            );
        }
    }

    #[test]
    fn admin_roles_are_allowed() {
        let p = principal();
        for role in [Role::Admin, Role::SuperAdmin] {
            assert_eq!(
                decide(Some(&p), Some(role), ADMIN_ROLES),
                AccessDecision::Allowed(role)
            );
        }
    }

    #[test]
    fn absent_principal_is_denied_regardless_of_role() {
        for role in [
            None,
            Some(Role::User),
            Some(Role::Creator),
            Some(Role::Admin),
            Some(Role::SuperAdmin),
        ] {
            assert_eq!(decide(None, role, ADMIN_ROLES), AccessDecision::DeniedAnonymous);
        }
    }

    #[test]
    fn unknown_role_is_denied_not_privileged() {
        let p = principal();
        assert_eq!(
            decide(Some(&p), None, ADMIN_ROLES),
            AccessDecision::DeniedInsufficientRole(None)
        );
        // An empty required set denies every resolved role too
        assert_eq!(
            decide(Some(&p), Some(Role::Admin), &[]),
            AccessDecision::DeniedInsufficientRole(Some(Role::Admin))
        );
    }

    #[test]
    fn decisions_are_deterministic() {
        let p = principal();
        let first = decide(Some(&p), Some(Role::Creator), ADMIN_ROLES);
        let second = decide(Some(&p), Some(Role::Creator), ADMIN_ROLES);
        assert_eq!(first, second);
    }
}
