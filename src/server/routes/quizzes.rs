use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{self, Question};
use crate::server::app::AppState;
use crate::telemetry::QUIZ_QUESTION_CNTR;

use super::{ApiError, ApiResult, JsonBody};

#[derive(Deserialize)]
struct QuizBody {
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Deserialize)]
struct QuizCategory {
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Option<Question>,
}

// Category id 0 means no category filter.
async fn next_question(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<QuizBody>,
) -> ApiResult<QuizResponse> {
    let (Some(previous), Some(category)) = (body.previous_questions, body.quiz_category) else {
        return Err(ApiError::Unprocessable);
    };
    let filter = (category.id != 0).then_some(category.id);
    let question = db::queries::questions::next_quiz_question(&pool, filter, &previous).await?;
    if question.is_some() {
        QUIZ_QUESTION_CNTR
            .with_label_values(&[category.id.to_string().as_str()])
            .inc();
    }
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
