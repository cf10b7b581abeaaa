use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::services::AuthUser,
    error::{internal, DomainError},
    expiry,
    inventory::services::near_expiry,
    state::AppState,
};

use super::catalog::Recipe;
use super::dto::{FeedbackRequest, FromInventoryRequest, FromInventoryResponse, SuggestRequest};
use super::repo::Feedback;
use super::services::{suggest, Suggestion};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/suggestions", post(suggest_recipes))
        .route("/recipes/:name/feedback", get(list_feedback))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/from-inventory", post(suggest_from_inventory))
        .route("/recipes/:name/feedback", post(submit_feedback))
}

fn resolve_limit(state: &AppState, limit: Option<usize>) -> Result<usize, (StatusCode, String)> {
    match limit {
        Some(0) => Err(DomainError::invalid("limit must be at least 1").into()),
        Some(n) => Ok(n),
        None => Ok(state.config.recipe_limit),
    }
}

fn find_recipe(state: &AppState, name: &str) -> Result<&'static Recipe, (StatusCode, String)> {
    state
        .catalog
        .find(name)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Recipe '{}' not found", name)))
}

pub async fn list_recipes(State(state): State<AppState>) -> Json<&'static [Recipe]> {
    Json(state.catalog.recipes())
}

/// Ranks the catalog against arbitrary ingredient names.
#[instrument(skip(state))]
pub async fn suggest_recipes(
    State(state): State<AppState>,
    Json(body): Json<SuggestRequest>,
) -> Result<Json<Vec<Suggestion<'static>>>, (StatusCode, String)> {
    let limit = resolve_limit(&state, body.limit)?;
    let names: Vec<String> = body
        .ingredients
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    Ok(Json(suggest(state.catalog, &names, limit)))
}

/// Suggestions fed by the caller's items that are within the near-expiry window.
#[instrument(skip(state))]
pub async fn suggest_from_inventory(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<FromInventoryRequest>,
) -> Result<Json<FromInventoryResponse>, (StatusCode, String)> {
    let limit = resolve_limit(&state, body.limit)?;
    let items = state.items.list(user_id).await.map_err(internal)?;

    let selected: Vec<String> = body
        .selected
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    let eligible: Vec<_> = near_expiry(items, expiry::today())
        .into_iter()
        .filter(|r| selected.is_empty() || selected.contains(&r.item.name.to_lowercase()))
        .collect();

    if eligible.is_empty() {
        info!(%user_id, "no near-expiry ingredients to suggest from");
        return Ok(Json(FromInventoryResponse {
            eligible,
            suggestions: Vec::new(),
        }));
    }

    let names: Vec<String> = eligible.iter().map(|r| r.item.name.clone()).collect();
    let suggestions = suggest(state.catalog, &names, limit);
    info!(
        %user_id,
        ingredients = names.len(),
        suggestions = suggestions.len(),
        "recipes suggested"
    );
    Ok(Json(FromInventoryResponse {
        eligible,
        suggestions,
    }))
}

#[instrument(skip(state, body))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(name): Path<String>,
    Json(body): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>), (StatusCode, String)> {
    let recipe = find_recipe(&state, &name)?;
    let text = body.feedback.trim();
    if text.is_empty() {
        warn!(%user_id, recipe = %recipe.name, "empty feedback");
        return Err(DomainError::invalid("feedback must not be empty").into());
    }
    let saved = state
        .feedback
        .submit(user_id, &recipe.name, text)
        .await
        .map_err(internal)?;
    info!(%user_id, recipe = %recipe.name, "feedback saved");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[instrument(skip(state))]
pub async fn list_feedback(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Feedback>>, (StatusCode, String)> {
    let recipe = find_recipe(&state, &name)?;
    let entries = state.feedback.list(&recipe.name).await.map_err(internal)?;
    Ok(Json(entries))
}
