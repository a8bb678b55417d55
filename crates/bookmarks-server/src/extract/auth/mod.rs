//! Access token claims and the extractors that verify them.

mod auth_user;
mod jwt_claims;
mod jwt_header;

pub use self::auth_user::{AuthUser, UserField};
pub use self::jwt_claims::AuthClaims;
pub use self::jwt_header::AuthHeader;
