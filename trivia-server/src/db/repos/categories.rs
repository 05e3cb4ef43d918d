//! Category repository
//!
//! Categories are read-only for the API; `insert` exists for seeding.

use sqlx::PgPool;

use super::DbError;
use crate::models::Category;

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All categories ordered by id.
    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Create a category, returning the existing row on conflict (idempotent).
    pub async fn insert(&self, kind: &str) -> Result<Category, DbError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (type) VALUES ($1)
            ON CONFLICT (type) DO UPDATE SET type = EXCLUDED.type
            RETURNING id, type
            "#,
        )
        .bind(kind)
        .fetch_one(self.pool)
        .await?;

        Ok(category)
    }
}
