//! Users table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Users table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum UserConstraints {
    #[strum(serialize = "users_email_length")]
    EmailLength,
    #[strum(serialize = "users_password_hash_not_empty")]
    PasswordHashNotEmpty,

    #[strum(serialize = "users_updated_after_created")]
    UpdatedAfterCreated,

    #[strum(serialize = "users_email_unique_idx")]
    EmailUnique,
}

impl UserConstraints {
    /// Creates a new [`UserConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }
}

impl From<UserConstraints> for String {
    #[inline]
    fn from(val: UserConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for UserConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_variant_round_trips_through_its_name() {
        for constraint in UserConstraints::iter() {
            assert_eq!(UserConstraints::new(&constraint.to_string()), Some(constraint));
        }
    }
}
