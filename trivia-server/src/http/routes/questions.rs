//! Question endpoints

use std::sync::Arc;

use axum::{extract::State, routing::{delete, get, post}, Json, Router};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, ListQuery};
use crate::http::error::ApiError;
use crate::http::extractors::{IdParam, JsonBody, QueryParams};
use crate::http::server::AppState;
use crate::models::{lenient, Category, NewQuestion, PaginationParams, Question, ValidationError};

/// Query string for GET /api/questions
#[derive(Debug, Default, Deserialize)]
pub struct ListQuestionsParams {
    #[serde(default, deserialize_with = "lenient::opt_query_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_query_u32")]
    pub limit: Option<u32>,
    pub category: Option<String>,
}

impl From<ListQuestionsParams> for ListQuery {
    fn from(params: ListQuestionsParams) -> Self {
        let pagination = PaginationParams {
            page: params.page,
            limit: params.limit,
        };
        Self {
            pagination: pagination.resolve(),
            category: params.category.filter(|c| !c.is_empty()),
        }
    }
}

#[derive(Serialize)]
pub struct ListQuestionsResponse {
    pub success: bool,
    pub total_questions: i64,
    pub questions: Vec<Question>,
    pub categories: Vec<Category>,
}

/// Create question request
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub difficulty: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub category: Option<i64>,
}

impl CreateQuestionRequest {
    fn validate(self) -> Result<NewQuestion, ValidationError> {
        let question = self.question.ok_or(ValidationError::Empty { field: "question" })?;
        let answer = self.answer.ok_or(ValidationError::Empty { field: "answer" })?;
        let difficulty = self.difficulty.ok_or(ValidationError::Empty { field: "difficulty" })?;
        let category = self.category.ok_or(ValidationError::Empty { field: "category" })?;
        NewQuestion::new(&question, &answer, difficulty, category)
    }
}

#[derive(Serialize)]
pub struct CreateQuestionResponse {
    pub success: bool,
    pub id: i32,
    pub total_questions: i64,
}

#[derive(Serialize)]
pub struct DeleteQuestionResponse {
    pub success: bool,
    pub id: i32,
    pub message: &'static str,
}

/// Search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

/// Question list plus the full question count
#[derive(Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
}

impl From<catalog::QuestionMatches> for QuestionsResponse {
    fn from(m: catalog::QuestionMatches) -> Self {
        Self {
            success: true,
            questions: m.questions,
            total_questions: m.total,
        }
    }
}

/// GET /api/questions - list questions, optionally paginated / filtered
async fn list_questions(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListQuestionsParams>,
) -> Result<Json<ListQuestionsResponse>, ApiError> {
    let query = ListQuery::from(params);
    let listing = catalog::list_questions(state.store.as_ref(), &query).await?;

    Ok(Json(ListQuestionsResponse {
        success: true,
        total_questions: listing.total,
        questions: listing.questions,
        categories: listing.categories,
    }))
}

/// POST /api/questions - create a question
async fn create_question(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateQuestionRequest>,
) -> Result<Json<CreateQuestionResponse>, ApiError> {
    let new = req.validate()?;
    let created = catalog::create_question(state.store.as_ref(), &new).await?;

    Ok(Json(CreateQuestionResponse {
        success: true,
        id: created.id,
        total_questions: created.total,
    }))
}

/// DELETE /api/questions/{id} - delete a question
async fn delete_question(
    State(state): State<Arc<AppState>>,
    IdParam(id): IdParam,
) -> Result<Json<DeleteQuestionResponse>, ApiError> {
    let id = catalog::delete_question(state.store.as_ref(), id).await?;

    Ok(Json(DeleteQuestionResponse {
        success: true,
        id,
        message: "Question has been deleted",
    }))
}

/// POST /api/questions/search - substring search on question text
async fn search_questions(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<SearchRequest>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let term = req
        .search_term
        .ok_or(ValidationError::Empty { field: "searchTerm" })?;
    let matches = catalog::search_questions(state.store.as_ref(), &term).await?;
    Ok(Json(matches.into()))
}

/// Question routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/questions", get(list_questions).post(create_question))
        .route("/api/questions/search", post(search_questions))
        .route("/api/questions/{id}", delete(delete_question))
}
