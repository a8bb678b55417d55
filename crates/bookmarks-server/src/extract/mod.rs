//! Request extractors with JSON error rejections.

mod auth;
mod reject;

pub use self::auth::{AuthClaims, AuthHeader, AuthUser, UserField};
pub use self::reject::{Json, Path, Query, ValidateJson};
