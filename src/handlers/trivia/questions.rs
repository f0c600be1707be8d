use std::collections::BTreeMap;

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::database::models::{Question, QuestionDraft};
use crate::error::ApiError;
use crate::handlers::utils::{lenient_usize, opt_int_or_string, required_text};
use crate::middleware::{ApiJson, ApiPath, ApiQuery, ApiResponse, ApiResult};
use crate::query::{page_window, paginate, search_by_text};
use crate::state::TriviaState;

use super::category_map;

const DIFFICULTY_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Anything that is not a non-negative integer means page 1
    #[serde(default, deserialize_with = "lenient_usize")]
    pub page: Option<usize>,
}

impl PageQuery {
    fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<i32, String>,
    pub current_category: Option<i32>,
}

/// GET /questions?page=N
pub async fn list(
    State(state): State<TriviaState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<QuestionPage> {
    let all = state.questions.all().await?;
    let page = paginate(&all, query.page(), state.questions_per_page)?.to_vec();
    let categories = state.categories.all().await?;

    Ok(ApiResponse::success(QuestionPage {
        questions: page,
        total_questions: all.len(),
        categories: category_map(&categories),
        current_category: None,
    }))
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub question_id: i32,
}

/// DELETE /questions/:id
pub async fn delete(State(state): State<TriviaState>, ApiPath(id): ApiPath<i32>) -> ApiResult<Deleted> {
    state.questions.delete(id).await?;
    tracing::info!(question_id = id, "Deleted question");

    Ok(ApiResponse::success(Deleted { question_id: id }))
}

#[derive(Debug, Deserialize)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub category: Option<i32>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub difficulty: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub created: i32,
    pub total_questions: usize,
}

/// POST /questions
pub async fn create(
    State(state): State<TriviaState>,
    ApiJson(body): ApiJson<NewQuestion>,
) -> ApiResult<Created> {
    let question = required_text(body.question).ok_or_else(|| ApiError::bad_request("question is required"))?;
    let answer = required_text(body.answer).ok_or_else(|| ApiError::bad_request("answer is required"))?;
    let category = body.category.ok_or_else(|| ApiError::bad_request("category is required"))?;
    let difficulty = body.difficulty.ok_or_else(|| ApiError::bad_request("difficulty is required"))?;

    if !DIFFICULTY_RANGE.contains(&difficulty) {
        return Err(ApiError::unprocessable_entity(format!(
            "difficulty must be between {} and {}",
            DIFFICULTY_RANGE.start(),
            DIFFICULTY_RANGE.end()
        )));
    }
    if state.categories.find_one(category).await?.is_none() {
        return Err(ApiError::unprocessable_entity(format!("category {} does not exist", category)));
    }

    let created = state
        .questions
        .insert(QuestionDraft {
            question,
            answer,
            category,
            difficulty,
        })
        .await?;
    tracing::info!(question_id = created.id, category, "Created question");

    Ok(ApiResponse::success(Created {
        created: created.id,
        total_questions: state.questions.count().await?,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<i32>,
}

/// POST /questions/search?page=N
pub async fn search(
    State(state): State<TriviaState>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchRequest>,
) -> ApiResult<SearchResults> {
    let term = body
        .search_term
        .ok_or_else(|| ApiError::bad_request("searchTerm is required"))?;

    let all = state.questions.all().await?;
    let hits: Vec<Question> = search_by_text(&all, &term).into_iter().cloned().collect();
    tracing::debug!(term = %term, hits = hits.len(), "Searched questions");

    Ok(ApiResponse::success(SearchResults {
        questions: page_window(&hits, query.page(), state.questions_per_page).to_vec(),
        total_questions: hits.len(),
        current_category: None,
    }))
}
