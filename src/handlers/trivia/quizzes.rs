use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::database::models::Question;
use crate::error::ApiError;
use crate::handlers::utils::int_or_string;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::query::{pick_quiz_question, ANY_CATEGORY};
use crate::state::TriviaState;

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    #[serde(deserialize_with = "int_or_string")]
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i32>,
    pub quiz_category: Option<QuizCategory>,
}

#[derive(Debug, Serialize)]
pub struct QuizTurn {
    pub question: Option<Question>,
}

/// POST /quizzes
///
/// Returns `question: null` once every question in the category has been asked.
pub async fn play(State(state): State<TriviaState>, ApiJson(body): ApiJson<QuizRequest>) -> ApiResult<QuizTurn> {
    let category = body
        .quiz_category
        .ok_or_else(|| ApiError::bad_request("quiz_category is required"))?;

    if category.id != ANY_CATEGORY && state.categories.find_one(category.id).await?.is_none() {
        return Err(ApiError::unprocessable_entity(format!(
            "quiz category {} does not exist",
            category.id
        )));
    }

    let all = state.questions.all().await?;
    let question = pick_quiz_question(&all, category.id, &body.previous_questions, &mut rand::thread_rng()).cloned();

    tracing::debug!(
        category = category.id,
        asked = body.previous_questions.len(),
        exhausted = question.is_none(),
        "Picked quiz question"
    );

    Ok(ApiResponse::success(QuizTurn { question }))
}
