use actix_web::{dev::Payload, error::ErrorUnauthorized, http::header, web, FromRequest, HttpRequest};
use anyhow::{bail, Context};
use chrono::Utc;
use futures_util::future::{ready, Ready};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const TOKEN_TTL_SECS: i64 = 24 * 3600;

/// Signing material, built once in `main` from `JWT_SECRET`.
pub struct Keys {
    pub jwt_secret: String,
}

/// Claims embedded in a bearer token. Decoded claims are display
/// identity only; API authorization always goes through the verified
/// extractor below plus per-endpoint role checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: u64,
    pub role: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub did: Option<u64>,
    #[serde(default)]
    pub pid: Option<u64>,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(
        uid: u64,
        role: String,
        name: String,
        email: String,
        did: Option<u64>,
        pid: Option<u64>,
    ) -> Self {
        let iat = Utc::now().timestamp();
        Self {
            sub: uid,
            role,
            name,
            email,
            did,
            pid,
            iat,
            exp: iat + TOKEN_TTL_SECS,
        }
    }
}

pub fn issue_token(claims: &SessionClaims, secret: &str) -> anyhow::Result<String> {
    jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Token signing failed")
}

/// Signature- and expiry-checked decode, used for API access.
pub fn verify_session(token: &str, secret: &str) -> anyhow::Result<SessionClaims> {
    let data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Invalid or expired token")?;
    Ok(data.claims)
}

/// Unverified claim extraction. Good enough to derive a display identity
/// (name, role) without a server round-trip, never for authorization.
/// Malformed tokens yield `None` and a warning, not an error.
pub fn decode_session(token: &str) -> Option<SessionClaims> {
    match jsonwebtoken::dangerous_insecure_decode::<SessionClaims>(token) {
        Ok(data) => Some(data.claims),
        Err(err) => {
            log::warn!("Malformed session token: {}", err);
            None
        }
    }
}

pub fn require_role(claims: &SessionClaims, roles: &[&str]) -> anyhow::Result<()> {
    if !roles.contains(&claims.role.as_str()) {
        bail!("Permission denied");
    }
    Ok(())
}

impl FromRequest for SessionClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;
    type Config = ();

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let result = match (req.app_data::<web::Data<Keys>>(), token) {
            (Some(keys), Some(token)) => {
                verify_session(token, &keys.jwt_secret).map_err(|err| ErrorUnauthorized(err.to_string()))
            }
            _ => Err(ErrorUnauthorized("Missing bearer token")),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> SessionClaims {
        SessionClaims::new(
            7,
            "doctor".to_string(),
            "Grace Okafor".to_string(),
            "grace@clinic.test".to_string(),
            Some(3),
            None,
        )
    }

    #[test]
    fn decode_recovers_identity_fields() {
        let token = issue_token(&claims(), "secret").unwrap();
        let decoded = decode_session(&token).unwrap();
        assert_eq!(decoded.sub, 7);
        assert_eq!(decoded.role, "doctor");
        assert_eq!(decoded.did, Some(3));
    }

    #[test]
    fn decode_rejects_garbage_without_panicking() {
        assert!(decode_session("not-a-jwt").is_none());
        assert!(decode_session("").is_none());
        assert!(decode_session("a.b.c").is_none());
    }

    #[test]
    fn verify_checks_signature() {
        let token = issue_token(&claims(), "secret").unwrap();
        assert!(verify_session(&token, "secret").is_ok());
        assert!(verify_session(&token, "other").is_err());
    }

    #[test]
    fn role_guard() {
        let claims = claims();
        assert!(require_role(&claims, &["doctor", "admin"]).is_ok());
        assert!(require_role(&claims, &["admin", "staff"]).is_err());
    }
}
