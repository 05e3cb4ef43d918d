//! In-process store for tests and `trivia serve --in-memory`
//!
//! Enforces the same rules as the PostgreSQL schema: unique question text,
//! questions must reference an existing category, ids are never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repos::DbError;
use super::store::TriviaStore;
use crate::models::{Category, NewQuestion, Question};

#[derive(Debug, Clone)]
struct StoredQuestion {
    question: String,
    answer: String,
    difficulty: i32,
    category: i32,
}

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i32, String>,
    questions: BTreeMap<i32, StoredQuestion>,
    last_category_id: i32,
    last_question_id: i32,
}

impl Tables {
    /// Inner join with categories, id order.
    fn joined<'a>(
        &'a self,
        filter: impl Fn(&StoredQuestion) -> bool + 'a,
    ) -> impl Iterator<Item = Question> + 'a {
        self.questions.iter().filter_map(move |(id, q)| {
            if !filter(q) {
                return None;
            }
            let name = self.categories.get(&q.category)?;
            Some(Question {
                id: *id,
                question: q.question.clone(),
                answer: q.answer.clone(),
                difficulty: q.difficulty,
                category_id: q.category,
                category_name: name.clone(),
            })
        })
    }
}

/// Memory-backed [`TriviaStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn questions(&self) -> Result<Vec<Question>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.joined(|_| true).collect())
    }

    async fn questions_in_category(&self, category_id: i32) -> Result<Vec<Question>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.joined(|q| q.category == category_id).collect())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, DbError> {
        let needle = term.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .joined(|q| q.question.to_lowercase().contains(&needle))
            .collect())
    }

    async fn count_questions(&self) -> Result<i64, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.questions.len() as i64)
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i32, DbError> {
        // Check and insert under one write lock, like a unique index would
        let mut tables = self.tables.write().await;

        if !tables.categories.contains_key(&question.category()) {
            return Err(DbError::UnknownCategory(question.category()));
        }
        if tables
            .questions
            .values()
            .any(|q| q.question == question.question())
        {
            return Err(DbError::DuplicateEntry {
                resource: "question",
                value: question.question().to_owned(),
            });
        }

        tables.last_question_id += 1;
        let id = tables.last_question_id;
        tables.questions.insert(
            id,
            StoredQuestion {
                question: question.question().to_owned(),
                answer: question.answer().to_owned(),
                difficulty: question.difficulty(),
                category: question.category(),
            },
        );
        Ok(id)
    }

    async fn delete_question(&self, id: i32) -> Result<i32, DbError> {
        let mut tables = self.tables.write().await;
        tables
            .questions
            .remove(&id)
            .map(|_| id)
            .ok_or_else(|| DbError::NotFound {
                resource: "question",
                id: id.to_string(),
            })
    }

    async fn categories(&self) -> Result<Vec<Category>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .iter()
            .map(|(id, kind)| Category {
                id: *id,
                kind: kind.clone(),
            })
            .collect())
    }

    async fn insert_category(&self, kind: &str) -> Result<Category, DbError> {
        let mut tables = self.tables.write().await;
        if let Some((id, existing)) = tables.categories.iter().find(|(_, k)| k.as_str() == kind) {
            return Ok(Category {
                id: *id,
                kind: existing.clone(),
            });
        }

        tables.last_category_id += 1;
        let id = tables.last_category_id;
        tables.categories.insert(id, kind.to_owned());
        Ok(Category {
            id,
            kind: kind.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(text: &str, category: i32) -> NewQuestion {
        NewQuestion::new(text, "answer", 1, category.into()).unwrap()
    }

    #[tokio::test]
    async fn questions_ordered_by_id_with_category_name() {
        let store = MemoryStore::new();
        let science = store.insert_category("Science").await.unwrap();
        let art = store.insert_category("Art").await.unwrap();

        store.insert_question(&new_question("b", art.id)).await.unwrap();
        store.insert_question(&new_question("a", science.id)).await.unwrap();

        let all = store.questions().await.unwrap();
        assert_eq!(all.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(all[0].category_name, "Art");
        assert_eq!(all[1].category_name, "Science");
    }

    #[tokio::test]
    async fn rejects_duplicates_and_unknown_categories() {
        let store = MemoryStore::new();
        let science = store.insert_category("Science").await.unwrap();

        store.insert_question(&new_question("What is H2O?", science.id)).await.unwrap();
        let err = store
            .insert_question(&new_question("What is H2O?", science.id))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicateEntry { .. }));

        let err = store.insert_question(&new_question("Orphan", 99)).await.unwrap_err();
        assert!(matches!(err, DbError::UnknownCategory(99)));
        assert_eq!(store.count_questions().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let science = store.insert_category("Science").await.unwrap();

        let first = store.insert_question(&new_question("one", science.id)).await.unwrap();
        assert_eq!(store.delete_question(first).await.unwrap(), first);
        let second = store.insert_question(&new_question("two", science.id)).await.unwrap();
        assert!(second > first);

        let err = store.delete_question(first).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let store = MemoryStore::new();
        let sports = store.insert_category("Sports").await.unwrap();
        store
            .insert_question(&new_question("What boxer's original name is Cassius Clay?", sports.id))
            .await
            .unwrap();
        store
            .insert_question(&new_question("Which country won the first World Cup?", sports.id))
            .await
            .unwrap();

        let hits = store.search_questions("CLAY").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(store.search_questions("zzzznomatch").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_category_idempotent() {
        let store = MemoryStore::new();
        let first = store.insert_category("History").await.unwrap();
        let second = store.insert_category("History").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.categories().await.unwrap().len(), 1);
    }
}
