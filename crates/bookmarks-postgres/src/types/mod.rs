//! Supporting types shared by models and queries.

mod constraint;

pub use constraint::{BookmarkConstraints, ConstraintViolation, UserConstraints};
