//! Response types for HTTP handlers.

mod bookmarks;
mod error_response;
mod tokens;
mod users;

pub use bookmarks::*;
pub use error_response::ErrorResponse;
pub use tokens::*;
pub use users::*;
