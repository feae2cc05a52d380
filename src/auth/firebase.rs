use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::utils::error::AppError;

/// Google's x509 certificate endpoint for Firebase ID token keys.
const CERT_URL: &str =
    "https://www.googleapis.com/robot/v1/metadata/x509/securetoken@system.gserviceaccount.com";

const KEY_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Identity claims extracted from a verified Firebase ID token.
#[derive(Debug, Clone)]
pub struct FirebaseIdentity {
    pub uid: String,
    pub name: String,
    pub email: String,
}

/// Seam for Firebase token verification, so handlers and tests do not
/// depend on Google's endpoints.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<FirebaseIdentity, AppError>;
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

struct KeyCache {
    keys: HashMap<String, String>,
    fetched_at: Instant,
}

/// Verifies Firebase ID tokens against Google's published x509 keys,
/// RS256, audience = the Firebase project id. Keys are cached for an
/// hour and refetched on a cache miss.
pub struct GoogleTokenVerifier {
    client: reqwest::Client,
    project_id: String,
    cache: Arc<RwLock<Option<KeyCache>>>,
}

impl GoogleTokenVerifier {
    pub fn new(project_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            project_id,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn key_pem(&self, kid: &str) -> Result<String, AppError> {
        {
            let cache = self.cache.read().await;
            if let Some(c) = cache.as_ref() {
                if c.fetched_at.elapsed() < KEY_CACHE_TTL {
                    if let Some(pem) = c.keys.get(kid) {
                        return Ok(pem.clone());
                    }
                }
            }
        }

        let keys: HashMap<String, String> = self
            .client
            .get(CERT_URL)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Failed to fetch keys: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Invalid key response: {}", e)))?;

        let pem = keys.get(kid).cloned();

        let mut cache = self.cache.write().await;
        *cache = Some(KeyCache {
            keys,
            fetched_at: Instant::now(),
        });

        pem.ok_or_else(|| AppError::AuthError("Unknown token signing key".to_string()))
    }
}

#[async_trait]
impl TokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<FirebaseIdentity, AppError> {
        let header = decode_header(id_token)
            .map_err(|_| AppError::AuthError("Malformed ID token".to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::AuthError("ID token missing key id".to_string()))?;

        let pem = self.key_pem(&kid).await?;
        let key = DecodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| AppError::InternalServerError(format!("Bad signing key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!("https://securetoken.google.com/{}", self.project_id)]);

        let data = decode::<FirebaseClaims>(id_token, &key, &validation)
            .map_err(|_| AppError::AuthError("Invalid or expired ID token".to_string()))?;

        let email = data.claims.email.unwrap_or_default();
        let name = data
            .claims
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.clone());

        Ok(FirebaseIdentity {
            uid: data.claims.sub,
            name,
            email,
        })
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Verifier stub that accepts tokens of the form `uid:name:email`.
    pub struct StaticVerifier;

    #[async_trait]
    impl TokenVerifier for StaticVerifier {
        async fn verify(&self, id_token: &str) -> Result<FirebaseIdentity, AppError> {
            let mut parts = id_token.splitn(3, ':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(uid), Some(name), Some(email)) if !uid.is_empty() => Ok(FirebaseIdentity {
                    uid: uid.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                }),
                _ => Err(AppError::AuthError("Invalid or expired ID token".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_static_verifier_parses_token() {
        let identity = StaticVerifier.verify("u1:Alice:a@x.io").await.unwrap();
        assert_eq!(identity.uid, "u1");
        assert_eq!(identity.email, "a@x.io");
    }

    #[tokio::test]
    async fn test_static_verifier_rejects_garbage() {
        assert!(StaticVerifier.verify("nope").await.is_err());
    }
}
