//! Schema bootstrap for the trivia tables
//!
//! Idempotent `IF NOT EXISTS` statements only. Databases restored from an
//! older dump keep their tables; the unique index on question text is added
//! on top.

use sqlx::PgPool;

/// Ensure tables and constraints exist
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring trivia schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            type TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // RESTRICT: a category still referenced by questions cannot be deleted
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id SERIAL PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            difficulty INTEGER NOT NULL,
            category INTEGER NOT NULL REFERENCES categories(id) ON DELETE RESTRICT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS questions_question_key ON questions (question)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS questions_category_idx ON questions (category)")
        .execute(pool)
        .await?;

    tracing::info!("Trivia schema ready");
    Ok(())
}
