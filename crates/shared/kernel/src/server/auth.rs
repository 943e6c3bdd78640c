//! Bearer token authentication.
//!
//! Tokens are HS256 JWTs carrying the user id (`sub`), `email` and an optional `name`.
//! They are minted by the identity provider in front of ConfHub, or by [`issue_token`].

use crate::server::error::ApiError;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use confhub_database::Database;
use confhub_database::records::ProfileRecord;
use confhub_domain::config::{ApiConfig, JwtConfig};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const AUTHORIZATION_REQUIRED: &str = "Authorization required";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    iss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aud: Option<String>,
    iat: i64,
    exp: i64,
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
    /// `name` claim, or the local part of the email.
    pub nickname: String,
}

impl CurrentUser {
    fn from_claims(claims: Claims) -> Self {
        let nickname = claims
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| email_local_part(&claims.email).to_owned());
        Self { user_id: claims.sub, email: claims.email, nickname }
    }

    /// Loads the caller's profile, creating it with the nickname and email on first access.
    pub async fn profile(&self, db: &Database) -> Result<ProfileRecord, ApiError> {
        Ok(db.ensure_profile(&self.user_id, &self.nickname, &self.email).await?)
    }
}

fn email_local_part(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    ApiConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = ApiConfig::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::unauthorized(AUTHORIZATION_REQUIRED))?;

        verify_token(&config.security.jwt, token)
    }
}

/// Validates `token` and returns its user.
///
/// # Errors
/// Returns [`ApiError::Unauthorized`] for a bad signature, issuer, audience or an expired token.
pub fn verify_token(config: &JwtConfig, token: &str) -> Result<CurrentUser, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);
    validation.leeway = config.clock_skew_seconds;
    match &config.audience {
        Some(audience) => validation.set_audience(&[audience.as_str()]),
        None => validation.validate_aud = false,
    }

    decode::<Claims>(token, &DecodingKey::from_secret(config.secret.as_bytes()), &validation)
        .map(|data| CurrentUser::from_claims(data.claims))
        .map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            ApiError::unauthorized(AUTHORIZATION_REQUIRED)
        })
}

/// Mints a token for `user_id` valid for the configured TTL.
///
/// # Errors
/// Returns [`ApiError::Internal`] if signing fails.
pub fn issue_token(
    config: &JwtConfig,
    user_id: &str,
    email: &str,
    name: Option<&str>,
) -> Result<String, ApiError> {
    let now = chrono::Utc::now().timestamp();
    let ttl = i64::try_from(config.ttl_seconds).unwrap_or(i64::MAX);

    let claims = Claims {
        sub: user_id.to_owned(),
        email: email.to_owned(),
        name: name.map(str::to_owned),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now,
        exp: now.saturating_add(ttl),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(config.secret.as_bytes()))
        .map_err(|e| ApiError::Internal {
            message: e.to_string().into(),
            context: Some("Signing token".into()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig { secret: "test-secret".to_owned(), ..JwtConfig::default() }
    }

    #[test]
    fn test_round_trip_with_name() {
        let token = issue_token(&config(), "u-1", "ada@example.com", Some("Ada")).unwrap();
        let user = verify_token(&config(), &token).unwrap();
        assert_eq!(user.user_id, "u-1");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.nickname, "Ada");
    }

    #[test]
    fn test_nickname_falls_back_to_email_local_part() {
        let token = issue_token(&config(), "u-2", "grace@example.com", None).unwrap();
        assert_eq!(verify_token(&config(), &token).unwrap().nickname, "grace");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(&config(), "u-1", "ada@example.com", None).unwrap();
        let other = JwtConfig { secret: "another".to_owned(), ..config() };
        assert!(matches!(verify_token(&other, &token), Err(ApiError::Unauthorized { .. })));
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let token = issue_token(&config(), "u-1", "ada@example.com", None).unwrap();
        let other = JwtConfig { issuer: "someone-else".to_owned(), ..config() };
        assert!(verify_token(&other, &token).is_err());
    }

    #[test]
    fn test_audience_is_enforced_when_configured() {
        let strict = JwtConfig { audience: Some("confhub-api".to_owned()), ..config() };
        let without = issue_token(&config(), "u-1", "ada@example.com", None).unwrap();
        assert!(verify_token(&strict, &without).is_err());

        let with = issue_token(&strict, "u-1", "ada@example.com", None).unwrap();
        assert!(verify_token(&strict, &with).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let expired = JwtConfig { ttl_seconds: 0, clock_skew_seconds: 0, ..config() };
        let token = issue_token(&expired, "u-1", "ada@example.com", None).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        assert!(verify_token(&expired, &token).is_err());
    }
}
