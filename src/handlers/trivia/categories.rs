use std::collections::BTreeMap;

use axum::extract::State;
use serde::Serialize;

use crate::database::models::Question;
use crate::middleware::{ApiPath, ApiResponse, ApiResult};
use crate::query::filter_by_category;
use crate::state::TriviaState;

use super::category_map;

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: BTreeMap<i32, String>,
    pub total_categories: usize,
    pub current_category: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: i32,
}

/// GET /categories
pub async fn list(State(state): State<TriviaState>) -> ApiResult<CategoryList> {
    let categories = state.categories.all().await?;

    Ok(ApiResponse::success(CategoryList {
        total_categories: categories.len(),
        categories: category_map(&categories),
        current_category: None,
    }))
}

/// GET /categories/:id/questions
///
/// The category must exist in the category collection; there is no fixed upper bound.
pub async fn questions(
    State(state): State<TriviaState>,
    ApiPath(category_id): ApiPath<i32>,
) -> ApiResult<CategoryQuestions> {
    state.categories.get_404(category_id).await?;

    let all = state.questions.all().await?;
    let questions: Vec<Question> = filter_by_category(&all, category_id).into_iter().cloned().collect();

    Ok(ApiResponse::success(CategoryQuestions {
        total_questions: questions.len(),
        questions,
        current_category: category_id,
    }))
}
