//! Question repository
//!
//! Every read joins `categories` so rows come back in the wire shape
//! (`category_id`, `category_name`) in a single query.

use sqlx::PgPool;

use super::{is_foreign_key_violation, is_unique_violation, DbError};
use crate::models::{NewQuestion, Question};

/// Question repository
pub struct QuestionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> QuestionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All questions with their category, ordered by id.
    pub async fn list(&self) -> Result<Vec<Question>, DbError> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT
                q.id,
                q.question,
                q.answer,
                q.difficulty,
                q.category AS category_id,
                c.type AS category_name
            FROM questions q
            JOIN categories c ON c.id = q.category
            ORDER BY q.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Questions belonging to one category, ordered by id.
    pub async fn list_for_category(&self, category_id: i32) -> Result<Vec<Question>, DbError> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT
                q.id,
                q.question,
                q.answer,
                q.difficulty,
                q.category AS category_id,
                c.type AS category_name
            FROM questions q
            JOIN categories c ON c.id = q.category
            WHERE q.category = $1
            ORDER BY q.id
            "#,
        )
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Case-insensitive substring search on question text.
    pub async fn search(&self, term: &str) -> Result<Vec<Question>, DbError> {
        let pattern = format!("%{}%", escape_like(term));
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT
                q.id,
                q.question,
                q.answer,
                q.difficulty,
                q.category AS category_id,
                c.type AS category_name
            FROM questions q
            JOIN categories c ON c.id = q.category
            WHERE q.question ILIKE $1 ESCAPE '\'
            ORDER BY q.id
            "#,
        )
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a question and return its id.
    ///
    /// The unique index on `questions.question` decides duplicates; a
    /// violation surfaces as [`DbError::DuplicateEntry`].
    pub async fn insert(&self, question: &NewQuestion) -> Result<i32, DbError> {
        let result = sqlx::query_as::<_, (i32,)>(
            r#"
            INSERT INTO questions (question, answer, difficulty, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(question.question())
        .bind(question.answer())
        .bind(question.difficulty())
        .bind(question.category())
        .fetch_one(self.pool)
        .await;

        match result {
            Ok((id,)) => Ok(id),
            Err(e) if is_unique_violation(&e) => Err(DbError::DuplicateEntry {
                resource: "question",
                value: question.question().to_owned(),
            }),
            Err(e) if is_foreign_key_violation(&e) => {
                Err(DbError::UnknownCategory(question.category()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a question by id, returning the deleted id.
    pub async fn delete(&self, id: i32) -> Result<i32, DbError> {
        let (deleted,): (i32,) = sqlx::query_as("DELETE FROM questions WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "question",
                id: id.to_string(),
            })?;

        Ok(deleted)
    }
}

/// Escape LIKE metacharacters so the term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
