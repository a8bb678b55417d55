//! Bookmarks table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Bookmarks table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum BookmarkConstraints {
    #[strum(serialize = "bookmarks_title_length")]
    TitleLength,
    #[strum(serialize = "bookmarks_link_length")]
    LinkLength,
    #[strum(serialize = "bookmarks_description_length")]
    DescriptionLength,

    #[strum(serialize = "bookmarks_updated_after_created")]
    UpdatedAfterCreated,

    #[strum(serialize = "bookmarks_user_id_fkey")]
    UserReference,
}

impl BookmarkConstraints {
    /// Creates a new [`BookmarkConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }
}

impl From<BookmarkConstraints> for String {
    #[inline]
    fn from(val: BookmarkConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for BookmarkConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
