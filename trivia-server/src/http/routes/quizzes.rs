//! Quiz endpoint

use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{lenient, Question, ValidationError};
use crate::quiz::{self, QuizCategory, QuizOutcome};

/// Quiz category as sent by the client (`type` is ignored)
#[derive(Debug, Deserialize)]
pub struct QuizCategoryBody {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
}

/// Quiz request
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Vec<i32>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategoryBody>,
}

/// `question` is null once the pool is exhausted; `count` is only sent then
#[derive(Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
    pub total_question: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl From<QuizOutcome> for QuizResponse {
    fn from(outcome: QuizOutcome) -> Self {
        let total_question = outcome.pool_size();
        match outcome {
            QuizOutcome::Next { question, .. } => Self {
                success: true,
                question: Some(question),
                total_question,
                count: None,
            },
            QuizOutcome::Exhausted { pool_size } => Self {
                success: true,
                question: None,
                total_question,
                count: Some(pool_size),
            },
        }
    }
}

/// POST /api/quizzes - next unseen question for a category
async fn next_question(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let category = req
        .quiz_category
        .ok_or(ValidationError::Empty { field: "quiz_category" })?;
    let category = QuizCategory::from_id(category.id)?;
    let previous: HashSet<i32> = req.previous_questions.unwrap_or_default().into_iter().collect();

    let outcome = quiz::next_question(state.store.as_ref(), category, &previous).await?;
    Ok(Json(outcome.into()))
}

/// Quiz routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/quizzes", post(next_question))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(id: i32) -> Question {
        Question {
            id,
            question: "Who discovered penicillin?".into(),
            answer: "Alexander Fleming".into(),
            difficulty: 3,
            category_id: 1,
            category_name: "Science".into(),
        }
    }

    #[test]
    fn exhausted_reports_count() {
        let body = serde_json::to_value(QuizResponse::from(QuizOutcome::Exhausted { pool_size: 3 }))
            .unwrap();
        assert_eq!(
            body,
            json!({"success": true, "question": null, "total_question": 3, "count": 3})
        );
    }

    #[test]
    fn next_question_omits_count() {
        let outcome = QuizOutcome::Next {
            question: question(7),
            pool_size: 4,
        };
        let body = serde_json::to_value(QuizResponse::from(outcome)).unwrap();
        assert_eq!(body["question"]["id"], 7);
        assert_eq!(body["total_question"], 4);
        assert!(body.get("count").is_none());
    }
}
