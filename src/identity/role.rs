use serde::{Deserialize, Serialize};

/// Privilege level assigned to a principal. One row per account in the
/// hosted profile table holds at most one of these at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Creator,
    Admin,
    SuperAdmin,
}

/// Roles that may enter the admin area. Fixed set, not configurable per call.
pub const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::SuperAdmin];

impl Role {
    /// Validating parse from the stored string form. Any value outside the
    /// fixed set resolves to `None` so a malformed or unrecognized row can
    /// never grant a privileged role.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim() {
            "user" => Some(Role::User),
            "creator" => Some(Role::Creator),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Creator => "creator",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}
