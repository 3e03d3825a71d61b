//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub isbn: String,
    /// Numeric score controlling the default catalog ordering
    pub popularity: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Book detail with the author record embedded
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub popularity: i32,
    pub author: Author,
}

/// Create/update book payload.
///
/// Popularity accepts either a JSON number or a numeric string, the way the
/// original HTML form coerced its text inputs.
#[serde_as]
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub author_id: i32,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = i32)]
    pub popularity: i32,
}

/// Book list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// "asc" or "desc" orders by popularity; anything else keeps stored order
    pub sort: Option<String>,
    /// Case-insensitive substring match on the title
    pub q: Option<String>,
}

/// Catalog sort order derived from the `sort` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
    /// Invalid or absent sort parameter: books in stored order
    Stored,
}

impl SortOrder {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("asc") => SortOrder::Ascending,
            Some("desc") => SortOrder::Descending,
            _ => SortOrder::Stored,
        }
    }

    /// Display label. Stored order keeps the historical "asc" label the
    /// original application fell through to.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Descending => "desc",
            _ => "asc",
        }
    }
}
