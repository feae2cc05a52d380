use std::env;
use std::net::SocketAddr;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

/// Runtime configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Secret for organiser/admin session JWTs.
    pub jwt_secret: String,
    /// Firebase project id, the expected audience of end-user ID tokens.
    pub firebase_project_id: String,
    /// Razorpay publishable key id, returned to clients alongside orders.
    pub razorpay_key_id: String,
    /// Razorpay key secret, used for order creation and signature checks.
    pub razorpay_key_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3001)));

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/eventrix".to_string()),
            bind_addr,
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret".to_string()),
            firebase_project_id: env::var("FIREBASE_PROJECT_ID").unwrap_or_default(),
            razorpay_key_id: env::var("RAZORPAY_KEY_ID").unwrap_or_default(),
            razorpay_key_secret: env::var("RAZORPAY_KEY_SECRET").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_has_sane_defaults() {
        std::env::remove_var("BIND_ADDR");
        let config = Config::from_env();
        assert_eq!(config.bind_addr.port(), 3001);
    }
}
