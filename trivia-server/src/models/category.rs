//! Question categories

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Categories created by `trivia seed` on an empty database.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// Category row. Serialized as `{id, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}
