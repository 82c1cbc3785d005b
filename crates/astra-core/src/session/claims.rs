//! Bearer-token payload decoding.
//!
//! The backend issues JWTs whose payload segment embeds the user identifier.
//! The client decodes that segment without validating the signature — the
//! backend is the sole validator of token authenticity and expiry; the
//! client only needs the identifier for per-user requests.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Claims the client cares about inside the token payload.
///
/// Unknown claims are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// The backend-assigned user identifier.
    pub user_id: String,
    /// Display name, when the backend embeds one.
    #[serde(default)]
    pub username: Option<String>,
    /// Expiry as a unix timestamp. Informational only; not enforced
    /// client-side.
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Decodes the payload segment of a bearer token.
///
/// Returns `None` for any structural failure — a token that is not
/// three-segment, a payload that is not base64url, or JSON missing the
/// `user_id` claim. Callers treat `None` as "unauthenticated"; decoding
/// never errors.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!("token payload is not valid base64url: {}", err);
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(claims) => Some(claims),
        Err(err) => {
            tracing::debug!("token payload is not a claims object: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an unsigned token with the given payload JSON, the same
    /// three-segment shape the backend produces.
    fn fake_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_decode_user_id() {
        let token = fake_token(r#"{"user_id":"u-42","exp":1735689600}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, "u-42");
        assert_eq!(claims.exp, Some(1735689600));
        assert_eq!(claims.username, None);
    }

    #[test]
    fn test_unknown_claims_ignored() {
        let token = fake_token(r#"{"user_id":"u-1","role":"analyst","iat":1}"#);
        assert_eq!(decode_claims(&token).unwrap().user_id, "u-1");
    }

    #[test]
    fn test_garbage_token_yields_absent() {
        assert_eq!(decode_claims(""), None);
        assert_eq!(decode_claims("not-a-token"), None);
        assert_eq!(decode_claims("a.!!!.c"), None);
    }

    #[test]
    fn test_missing_user_id_yields_absent() {
        let token = fake_token(r#"{"sub":"someone-else"}"#);
        assert_eq!(decode_claims(&token), None);
    }

    #[test]
    fn test_padded_payload_tolerated() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let body = format!("{}==", URL_SAFE_NO_PAD.encode(r#"{"user_id":"u-7"}"#));
        let token = format!("{header}.{body}.sig");
        assert_eq!(decode_claims(&token).unwrap().user_id, "u-7");
    }
}
