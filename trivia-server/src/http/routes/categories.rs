//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::questions::QuestionsResponse;
use crate::catalog;
use crate::http::error::ApiError;
use crate::http::extractors::IdParam;
use crate::http::server::AppState;
use crate::models::Category;

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
    pub total_categories: usize,
}

/// GET /api/categories - list all categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = catalog::list_categories(state.store.as_ref()).await?;

    Ok(Json(CategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

/// GET /api/categories/{category_id}/questions - questions of one category
async fn category_questions(
    State(state): State<Arc<AppState>>,
    IdParam(category_id): IdParam,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let matches = catalog::questions_in_category(state.store.as_ref(), category_id).await?;
    Ok(Json(matches.into()))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/{category_id}/questions", get(category_questions))
}
