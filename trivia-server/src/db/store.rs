//! Storage handle passed to every catalog and quiz operation

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{CategoryRepo, DbError, QuestionRepo};
use crate::models::{Category, NewQuestion, Question};

/// Trait for trivia storage (testable)
///
/// Question reads return rows joined with their category, ordered by id.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// Short backend name for logs and /health
    fn kind(&self) -> &'static str;

    async fn questions(&self) -> Result<Vec<Question>, DbError>;

    async fn questions_in_category(&self, category_id: i32) -> Result<Vec<Question>, DbError>;

    /// Case-insensitive substring match on question text.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, DbError>;

    async fn count_questions(&self) -> Result<i64, DbError>;

    /// Insert a question. Duplicate text fails with [`DbError::DuplicateEntry`].
    async fn insert_question(&self, question: &NewQuestion) -> Result<i32, DbError>;

    async fn delete_question(&self, id: i32) -> Result<i32, DbError>;

    async fn categories(&self) -> Result<Vec<Category>, DbError>;

    /// Create a category, returning the existing one if the name is taken.
    async fn insert_category(&self, kind: &str) -> Result<Category, DbError>;
}

/// PostgreSQL store backed by a connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn questions(&self) -> Result<Vec<Question>, DbError> {
        QuestionRepo::new(&self.pool).list().await
    }

    async fn questions_in_category(&self, category_id: i32) -> Result<Vec<Question>, DbError> {
        QuestionRepo::new(&self.pool).list_for_category(category_id).await
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, DbError> {
        QuestionRepo::new(&self.pool).search(term).await
    }

    async fn count_questions(&self) -> Result<i64, DbError> {
        QuestionRepo::new(&self.pool).count().await
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i32, DbError> {
        QuestionRepo::new(&self.pool).insert(question).await
    }

    async fn delete_question(&self, id: i32) -> Result<i32, DbError> {
        QuestionRepo::new(&self.pool).delete(id).await
    }

    async fn categories(&self) -> Result<Vec<Category>, DbError> {
        CategoryRepo::new(&self.pool).list().await
    }

    async fn insert_category(&self, kind: &str) -> Result<Category, DbError> {
        CategoryRepo::new(&self.pool).insert(kind).await
    }
}
