use axum::http::HeaderMap;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "studyhall_session";

/// Explicit per-request context handed to every identity resolution.
/// Built fresh from request headers; never stored in process-wide state, so
/// concurrent requests stay fully independent.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub access_token: Option<String>,
    pub request_id: Option<String>,
}

impl RequestContext {
    /// Extract the caller's access token from an `Authorization: Bearer`
    /// header, falling back to the session cookie.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let bearer = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string());
        let access_token = bearer.or_else(|| parse_cookie(headers, SESSION_COOKIE));
        Self {
            access_token,
            request_id: Some(Uuid::new_v4().to_string()),
        }
    }
}

fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie = headers.get("cookie").or_else(|| headers.get("Cookie"))?;
    let s = cookie.to_str().ok()?;
    for part in s.split(';') {
        let p = part.trim();
        if let Some(eq) = p.find('=') {
            let (k, v) = p.split_at(eq);
            if k == name {
                return Some(v[1..].to_string());
            }
        }
    }
    None
}
