//! Unified application error model and mapping helpers.
//! Handlers present denial and upstream failure distinctly: an outage maps
//! to a generic 503, never to a "you are not authorized" response.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::identity::AccessError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    Auth { code: String, message: String },
    Forbidden { code: String, message: String },
    Upstream { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::Auth { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::Upstream { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Auth { message, .. }
            | AppError::Forbidden { message, .. }
            | AppError::Upstream { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self {
        AppError::Auth { code: code.into(), message: msg.into() }
    }
    pub fn forbidden<S: Into<String>>(code: S, msg: S) -> Self {
        AppError::Forbidden { code: code.into(), message: msg.into() }
    }
    pub fn upstream<S: Into<String>>(code: S, msg: S) -> Self {
        AppError::Upstream { code: code.into(), message: msg.into() }
    }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self {
        AppError::Internal { code: code.into(), message: msg.into() }
    }

    /// Map to HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::Auth { .. } => 401,
            AppError::Forbidden { .. } => 403,
            AppError::Upstream { .. } => 503,
            AppError::Internal { .. } => 500,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::IdentityUnavailable(m) => AppError::Upstream {
                code: "identity_unavailable".into(),
                message: m,
            },
            AccessError::ProfileLookupFailed(m) => AppError::Upstream {
                code: "profile_lookup_failed".into(),
                message: m,
            },
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal { code: "internal".into(), message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping() {
        assert_eq!(AppError::auth("auth", "no").http_status(), 401);
        assert_eq!(AppError::forbidden("forbidden", "denied").http_status(), 403);
        assert_eq!(AppError::upstream("upstream", "down").http_status(), 503);
        assert_eq!(AppError::internal("internal", "panic").http_status(), 500);
    }

    #[test]
    fn access_errors_map_to_upstream_not_auth() {
        let app: AppError = AccessError::IdentityUnavailable("timeout".into()).into();
        assert_eq!(app.code_str(), "identity_unavailable");
        assert_eq!(app.http_status(), 503);

        let app: AppError = AccessError::ProfileLookupFailed("500".into()).into();
        assert_eq!(app.code_str(), "profile_lookup_failed");
        assert_eq!(app.http_status(), 503);
    }
}
