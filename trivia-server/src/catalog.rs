//! Question and category operations
//!
//! Each operation takes the store explicitly and returns plain data; the
//! HTTP layer shapes it into response bodies.

use crate::db::TriviaStore;
use crate::error::{Error, Result};
use crate::models::{Category, NewQuestion, Pagination, Question};

/// Filters for [`list_questions`]
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// `None` returns every question
    pub pagination: Option<Pagination>,
    /// Exact, case-sensitive match on the category name
    pub category: Option<String>,
}

/// Result of [`list_questions`]
#[derive(Debug, Clone)]
pub struct QuestionListing {
    pub questions: Vec<Question>,
    /// Count of all questions, before pagination and filtering
    pub total: i64,
    pub categories: Vec<Category>,
}

/// Questions plus the full question count
#[derive(Debug, Clone)]
pub struct QuestionMatches {
    pub questions: Vec<Question>,
    pub total: i64,
}

/// Result of [`create_question`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Created {
    pub id: i32,
    pub total: i64,
}

/// List questions, optionally paginated and then filtered by category name.
///
/// Fails with NotFound when there are no questions at all or when the
/// requested page is past the end. Filtering happens after pagination, so a
/// page can legitimately come back empty once filtered.
pub async fn list_questions(store: &dyn TriviaStore, query: &ListQuery) -> Result<QuestionListing> {
    let all = store.questions().await?;
    if all.is_empty() {
        return Err(Error::NotFound("No questions listed yet".into()));
    }
    let total = all.len() as i64;

    let mut questions = match query.pagination {
        Some(page) => {
            let slice = page.slice(&all);
            if slice.is_empty() {
                return Err(Error::NotFound(format!(
                    "Page {} is out of range",
                    page.page
                )));
            }
            slice.to_vec()
        }
        None => all,
    };

    if let Some(name) = &query.category {
        questions.retain(|q| &q.category_name == name);
    }

    let categories = store.categories().await?;
    tracing::debug!(
        total,
        returned = questions.len(),
        "listed questions"
    );

    Ok(QuestionListing {
        questions,
        total,
        categories,
    })
}

/// All categories; NotFound when none exist.
pub async fn list_categories(store: &dyn TriviaStore) -> Result<Vec<Category>> {
    let categories = store.categories().await?;
    if categories.is_empty() {
        return Err(Error::NotFound("No categories listed yet".into()));
    }
    Ok(categories)
}

/// Questions of one category; NotFound when the category has none.
pub async fn questions_in_category(
    store: &dyn TriviaStore,
    category_id: i32,
) -> Result<QuestionMatches> {
    let questions = store.questions_in_category(category_id).await?;
    if questions.is_empty() {
        return Err(Error::NotFound(
            "No questions based on this category".into(),
        ));
    }
    let total = store.count_questions().await?;
    Ok(QuestionMatches { questions, total })
}

/// Insert a question. Duplicate text is reported by the store.
pub async fn create_question(store: &dyn TriviaStore, question: &NewQuestion) -> Result<Created> {
    let id = store.insert_question(question).await?;
    let total = store.count_questions().await?;
    tracing::info!(id, category = question.category(), "question created");
    Ok(Created { id, total })
}

/// Delete a question by id, returning the id.
pub async fn delete_question(store: &dyn TriviaStore, id: i32) -> Result<i32> {
    let deleted = store.delete_question(id).await.map_err(|e| match Error::from(e) {
        Error::NotFound(_) => Error::NotFound("Question not found".into()),
        other => other,
    })?;
    tracing::info!(id = deleted, "question deleted");
    Ok(deleted)
}

/// Case-insensitive substring search. No match is an empty list, not an error.
pub async fn search_questions(store: &dyn TriviaStore, term: &str) -> Result<QuestionMatches> {
    let questions = store.search_questions(term).await?;
    let total = store.count_questions().await?;
    Ok(QuestionMatches { questions, total })
}
