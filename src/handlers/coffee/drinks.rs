use axum::extract::{Extension, State};
use serde::{Deserialize, Serialize};

use crate::database::models::{Drink, DrinkDraft, Ingredient, ShortDrink, DRINK_TITLE_MAX_LEN};
use crate::error::ApiError;
use crate::handlers::utils::required_text;
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};
use crate::state::CoffeeState;

#[derive(Debug, Serialize)]
pub struct Menu<T> {
    pub drinks: Vec<T>,
}

/// A recipe may be posted as a list of ingredients or as a single one
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl From<RecipeInput> for Vec<Ingredient> {
    fn from(input: RecipeInput) -> Self {
        match input {
            RecipeInput::Many(list) => list,
            RecipeInput::One(single) => vec![single],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

impl DrinkRequest {
    /// Title and recipe are both required; drinks are replaced wholesale.
    fn into_draft(self) -> Result<DrinkDraft, ApiError> {
        let title = required_text(self.title).ok_or_else(|| ApiError::bad_request("title is required"))?;
        if title.chars().count() > DRINK_TITLE_MAX_LEN {
            return Err(ApiError::unprocessable_entity(format!(
                "title must be at most {} characters",
                DRINK_TITLE_MAX_LEN
            )));
        }
        let recipe: Vec<Ingredient> = self
            .recipe
            .ok_or_else(|| ApiError::bad_request("recipe is required"))?
            .into();

        if recipe.is_empty() {
            return Err(ApiError::bad_request("recipe must contain at least one ingredient"));
        }
        if let Some(bad) = recipe.iter().find(|i| i.parts < 1) {
            return Err(ApiError::unprocessable_entity(format!(
                "ingredient '{}' must have at least one part",
                bad.name
            )));
        }

        Ok(DrinkDraft { title, recipe })
    }
}

/// GET /drinks (public, short representation)
pub async fn list(State(state): State<CoffeeState>) -> ApiResult<Menu<ShortDrink>> {
    let drinks = state.drinks.all().await?;

    Ok(ApiResponse::success(Menu {
        drinks: drinks.iter().map(Drink::short).collect(),
    }))
}

/// GET /drinks-detail (requires `get:drinks-detail`, long representation)
pub async fn detail(State(state): State<CoffeeState>) -> ApiResult<Menu<Drink>> {
    Ok(ApiResponse::success(Menu {
        drinks: state.drinks.all().await?,
    }))
}

/// POST /drinks (requires `post:drinks`)
pub async fn create(
    State(state): State<CoffeeState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(body): ApiJson<DrinkRequest>,
) -> ApiResult<Menu<Drink>> {
    let draft = body.into_draft()?;
    let drink = state.drinks.insert(draft).await?;
    tracing::info!(drink_id = drink.id, by = %user.subject, "Created drink");

    Ok(ApiResponse::success(Menu { drinks: vec![drink] }))
}

/// PATCH /drinks/:id (requires `patch:drinks`)
pub async fn update(
    State(state): State<CoffeeState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<DrinkRequest>,
) -> ApiResult<Menu<Drink>> {
    let existing = state.drinks.get_404(id).await?;
    let draft = body.into_draft()?;

    let drink = state
        .drinks
        .update(Drink {
            id: existing.id,
            title: draft.title,
            recipe: draft.recipe,
        })
        .await?;
    tracing::info!(drink_id = drink.id, by = %user.subject, "Updated drink");

    Ok(ApiResponse::success(Menu { drinks: vec![drink] }))
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub delete: i32,
}

/// DELETE /drinks/:id (requires `delete:drinks`)
pub async fn delete(
    State(state): State<CoffeeState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Deleted> {
    state.drinks.delete(id).await?;
    tracing::info!(drink_id = id, by = %user.subject, "Deleted drink");

    Ok(ApiResponse::success(Deleted { delete: id }))
}
