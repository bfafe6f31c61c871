use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use tracing::debug;
use shared_models::auth::JwtClaims;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    Missing,
    /// The token cannot be placed in a URL path segment, or it looks like a
    /// JWT whose claims do not decode.
    Malformed(String),
    Expired,
}

/// Token accepted for use; `claims` is set when the token was JWT-shaped.
#[derive(Debug)]
pub struct TokenInfo<'a> {
    pub raw: &'a str,
    pub claims: Option<JwtClaims>,
}

/// Check a stored token before it is interpolated into a request path.
///
/// Tokens are opaque to the portal, so the only hard requirement is that
/// they fit in one path segment. JWT-shaped tokens additionally get their
/// claims decoded (signature unchecked) so an expired session is caught
/// before a request is made.
pub fn inspect_token(token: Option<&str>) -> Result<TokenInfo<'_>, TokenError> {
    let raw = match token.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(TokenError::Missing),
    };

    if raw.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#')) {
        return Err(TokenError::Malformed("token is not a single path segment".to_string()));
    }

    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() != 3 {
        return Ok(TokenInfo { raw, claims: None });
    }

    let claims_json = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|_| TokenError::Malformed("Invalid claims encoding".to_string()))?;

    let claims: JwtClaims = match serde_json::from_slice(&claims_json) {
        Ok(c) => c,
        Err(e) => {
            debug!("Failed to parse claims: {}", e);
            return Err(TokenError::Malformed("Invalid claims format".to_string()));
        }
    };

    if let Some(exp) = claims.exp {
        let now = Utc::now().timestamp() as u64;
        if exp < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err(TokenError::Expired);
        }
    }

    Ok(TokenInfo { raw, claims: Some(claims) })
}
