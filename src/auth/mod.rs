pub mod cookies;
pub mod firebase;
pub mod guards;
pub mod jwt;
pub mod password;

pub use firebase::{FirebaseIdentity, TokenVerifier};
pub use guards::{AuthAdmin, AuthOrganiser, AuthUser};
