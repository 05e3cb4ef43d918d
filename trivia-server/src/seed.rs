//! Seeding categories and questions into an empty store

use serde::Deserialize;

use crate::db::{DbError, TriviaStore};
use crate::error::Result;
use crate::models::{lenient, Category, NewQuestion, DEFAULT_CATEGORIES};

/// One question in a seed file
#[derive(Debug, Clone, Deserialize)]
pub struct SeedQuestion {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "lenient::int")]
    pub difficulty: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub category: i64,
}

/// Outcome of [`load_questions`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert the default categories when the store has none.
///
/// Returns the categories present afterwards.
pub async fn seed_categories(store: &dyn TriviaStore) -> Result<Vec<Category>> {
    let existing = store.categories().await?;
    if !existing.is_empty() {
        tracing::info!(count = existing.len(), "categories already present, skipping");
        return Ok(existing);
    }

    let mut created = Vec::with_capacity(DEFAULT_CATEGORIES.len());
    for kind in DEFAULT_CATEGORIES {
        created.push(store.insert_category(kind).await?);
    }
    tracing::info!(count = created.len(), "seeded default categories");
    Ok(created)
}

/// Insert questions, skipping invalid rows, duplicates and unknown categories.
pub async fn load_questions(
    store: &dyn TriviaStore,
    questions: Vec<SeedQuestion>,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for raw in questions {
        let new = match NewQuestion::new(&raw.question, &raw.answer, raw.difficulty, raw.category)
        {
            Ok(new) => new,
            Err(e) => {
                tracing::warn!(question = %raw.question, error = %e, "skipping invalid question");
                report.skipped += 1;
                continue;
            }
        };

        match store.insert_question(&new).await {
            Ok(_) => report.inserted += 1,
            Err(e @ (DbError::DuplicateEntry { .. } | DbError::UnknownCategory(_))) => {
                tracing::warn!(question = %raw.question, error = %e, "skipping question");
                report.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "loaded seed questions"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[tokio::test]
    async fn seeds_defaults_once() {
        let store = MemoryStore::new();
        let first = seed_categories(&store).await.unwrap();
        assert_eq!(first.len(), 6);
        assert_eq!(first[0].kind, "Science");

        let second = seed_categories(&store).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn loads_questions_and_skips_bad_rows() {
        let store = MemoryStore::new();
        seed_categories(&store).await.unwrap();

        let rows: Vec<SeedQuestion> = serde_json::from_str(
            r#"[
                {"question": "What is the heaviest organ in the human body?", "answer": "The Liver", "difficulty": 4, "category": 1},
                {"question": "What is the heaviest organ in the human body?", "answer": "The Liver", "difficulty": 4, "category": 1},
                {"question": "Which dung beetle was worshipped by the ancient Egyptians?", "answer": "Scarab", "difficulty": "4", "category": "4"},
                {"question": "Unknown category", "answer": "x", "difficulty": 1, "category": 99},
                {"question": "", "answer": "x", "difficulty": 1, "category": 1}
            ]"#,
        )
        .unwrap();

        let report = load_questions(&store, rows).await.unwrap();
        assert_eq!(report, SeedReport { inserted: 2, skipped: 3 });
        assert_eq!(store.count_questions().await.unwrap(), 2);
    }
}
