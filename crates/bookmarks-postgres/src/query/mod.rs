//! Repository traits implemented for [`PgConnection`].
//!
//! Every query that can return an unbounded result set takes a
//! [`Pagination`] to keep the result size bounded.
//!
//! [`PgConnection`]: crate::PgConnection

mod bookmark;
mod user;

pub use bookmark::BookmarkRepository;
use serde::{Deserialize, Serialize};
pub use user::UserRepository;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Limit/offset pagination for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination, clamping `limit` to `1..=1000`
    /// and `offset` to non-negative values.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            offset: offset.max(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_bounds() {
        assert_eq!(Pagination::new(0, 10).limit, 1);
        assert_eq!(Pagination::new(1500, 10).limit, 1000);
        assert_eq!(Pagination::new(10, -5).offset, 0);
        assert_eq!(Pagination::new(25, 100), Pagination { limit: 25, offset: 100 });
    }

    #[test]
    fn pagination_default() {
        assert_eq!(Pagination::default(), Pagination::new(50, 0));
    }
}
