use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::{self, Question};
use crate::server::app::AppState;

use super::{category_map, ApiError, ApiResult};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    current_category: i64,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResult<CategoriesResponse> {
    let categories = db::queries::categories::get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&categories),
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    Path(category_id): Path<i64>,
) -> ApiResult<CategoryQuestions> {
    let questions = db::queries::questions::get_questions_for_category(&pool, category_id).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestions {
        success: true,
        questions,
        current_category: category_id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route(
            "/categories/{category_id}/questions",
            get(questions_for_category),
        )
        .with_state(state)
}
