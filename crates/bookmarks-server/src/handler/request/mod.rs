//! Request types for HTTP handlers.

mod authentications;
mod bookmarks;
mod paths;

pub use authentications::*;
pub use bookmarks::*;
pub use paths::*;
