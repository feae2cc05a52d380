use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::AppError;

/// Sessions live as long as the cookie: 7 days.
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    Organiser,
    Admin,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub role: SessionRole,
    pub exp: i64,
    pub iat: i64,
}

pub fn issue_token(secret: &str, subject: Uuid, role: SessionRole) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: subject,
        role,
        exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to sign session token: {}", e)))
}

/// Decode and validate a session token, additionally checking it was
/// issued for the expected role.
pub fn decode_token(
    secret: &str,
    token: &str,
    expected_role: SessionRole,
) -> Result<SessionClaims, AppError> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid or expired session".to_string()))?;

    if data.claims.role != expected_role {
        return Err(AppError::AuthError("Invalid session for this audience".to_string()));
    }

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_decode_round_trip() {
        let id = Uuid::new_v4();
        let token = issue_token("secret", id, SessionRole::Organiser).unwrap();
        let claims = decode_token("secret", &token, SessionRole::Organiser).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, SessionRole::Organiser);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_role_mismatch_is_rejected() {
        let token = issue_token("secret", Uuid::new_v4(), SessionRole::Organiser).unwrap();
        assert!(decode_token("secret", &token, SessionRole::Admin).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token("secret", Uuid::new_v4(), SessionRole::Admin).unwrap();
        assert!(decode_token("other-secret", &token, SessionRole::Admin).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(decode_token("secret", "not-a-jwt", SessionRole::Admin).is_err());
    }
}
