//! Credential hashing and access token handling.

mod password_hasher;
mod token_issuer;

pub use password_hasher::PasswordHasher;
pub use token_issuer::{AuthConfig, MIN_SECRET_LEN, TokenIssuer};
