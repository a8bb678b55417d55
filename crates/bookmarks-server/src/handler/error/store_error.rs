//! Store error to HTTP error conversion.

use crate::handler::Error;
use crate::service::store::StoreError;

impl From<StoreError> for Error<'static> {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Constraint(constraint) => constraint.into(),
            StoreError::Postgres(error) => error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bookmarks_postgres::PgError;
    use bookmarks_postgres::types::{ConstraintViolation, UserConstraints};

    use super::*;
    use crate::handler::ErrorKind;

    #[test]
    fn constraint_maps_through_violation() {
        let error: Error = StoreError::Constraint(ConstraintViolation::User(
            UserConstraints::EmailUnique,
        ))
        .into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn postgres_failure_is_internal() {
        let error: Error = StoreError::Postgres(PgError::Config("missing url".into())).into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }
}
