//! Path parameter types for HTTP handlers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameters for single-bookmark operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct BookmarkPathParams {
    /// Unique identifier of the bookmark.
    pub bookmark_id: Uuid,
}
