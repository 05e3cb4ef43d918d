//! Seed command: prepares the schema and loads categories and questions

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use trivia_server::db::{create_pool, schema};
use trivia_server::seed::{load_questions, seed_categories, SeedQuestion};
use trivia_server::PgStore;

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Database URL (overrides ~/.trivia/.env)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// JSON file with an array of questions
    /// ({"question", "answer", "difficulty", "category"})
    #[arg(long, value_name = "PATH")]
    pub questions: Option<PathBuf>,
}

/// Create tables, insert the default categories and optionally load questions
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    // Parse the file before touching the database
    let questions = match &args.questions {
        Some(path) => Some(read_questions(path)?),
        None => None,
    };

    let database_url = args
        .database_url
        .as_deref()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.trivia/.env")?;

    let pool = create_pool(database_url)
        .await
        .context("Failed to create database pool")?;
    schema::run(&pool)
        .await
        .context("Failed to prepare database schema")?;

    let store = PgStore::new(pool);
    let categories = seed_categories(&store)
        .await
        .context("Failed to seed categories")?;
    println!("categories: {}", categories.len());

    if let Some(questions) = questions {
        let report = load_questions(&store, questions)
            .await
            .context("Failed to load questions")?;
        println!(
            "questions: {} inserted, {} skipped",
            report.inserted, report.skipped
        );
    }

    Ok(())
}

fn read_questions(path: &Path) -> Result<Vec<SeedQuestion>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid question file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_question_file_with_string_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"question": "Q?", "answer": "A", "difficulty": "2", "category": 4}}]"#
        )
        .unwrap();

        let questions = read_questions(file.path()).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].difficulty, 2);
        assert_eq!(questions[0].category, 4);
    }

    #[test]
    fn rejects_malformed_question_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = read_questions(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid question file"));
    }
}
