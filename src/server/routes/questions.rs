use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{self, Question};
use crate::server::app::AppState;

use super::{category_map, ApiError, ApiResult, JsonBody};

const QUESTIONS_PER_PAGE: i64 = 10;

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

#[derive(Deserialize)]
struct NewQuestion {
    question: String,
    answer: String,
    category: Option<i64>,
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default)]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    categories: serde_json::Map<String, serde_json::Value>,
    total_questions: i64,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResult<QuestionsPage> {
    let offset = i64::from(page.unwrap_or(1).saturating_sub(1)) * QUESTIONS_PER_PAGE;
    let questions =
        db::queries::questions::get_questions_page(&pool, QUESTIONS_PER_PAGE, offset).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = db::queries::categories::get_all_categories(&pool).await?;
    let total_questions = db::queries::questions::count_questions(&pool).await?;
    Ok(Json(QuestionsPage {
        success: true,
        questions,
        categories: category_map(&categories),
        total_questions,
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    JsonBody(new_question): JsonBody<NewQuestion>,
) -> ApiResult<Created> {
    db::queries::questions::create_question(
        &pool,
        &new_question.question,
        &new_question.answer,
        new_question.category,
        new_question.difficulty,
    )
    .await?;
    Ok(Json(Created { success: true }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
) -> ApiResult<Deleted> {
    let question = db::queries::questions::get_question_by_id(&pool, question_id).await?;
    if question.is_none() {
        return Err(ApiError::NotFound);
    }
    db::queries::questions::delete_question(&pool, question_id).await?;
    Ok(Json(Deleted {
        success: true,
        deleted: question_id,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResult<SearchResults> {
    let questions = db::queries::questions::search_questions(&pool, &body.search_term).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SearchResults {
        success: true,
        questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{question_id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
