//! Identity resolution and role-based access control for the admin area.
//! Keep the public surface thin and split implementation across sub-modules.

mod authorizer;
mod guards;
mod principal;
mod request_context;
mod resolver;
mod role;

pub use authorizer::{decide, AccessDecision};
pub use guards::{AccessGate, AdminContext, AdminGate};
pub use principal::Principal;
pub use request_context::{RequestContext, SESSION_COOKIE};
pub use resolver::{AccessError, IdentityService, ProfileStore};
pub use role::{Role, ADMIN_ROLES};
