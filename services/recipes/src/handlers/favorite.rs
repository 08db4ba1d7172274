use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::error::RecipesServiceError;
use crate::handlers::recipe::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::favorite::{AddFavoriteUseCase, RemoveFavoriteUseCase};

// ── POST /recipes/{id}/favorite ──────────────────────────────────────────────

pub async fn add_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let uc = AddFavoriteUseCase {
        recipes: state.recipe_repo(),
        favorites: state.favorite_repo(),
    };
    let summary = uc.execute(identity.user_id, recipe_id).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

// ── DELETE /recipes/{id}/favorite ────────────────────────────────────────────

pub async fn remove_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = RemoveFavoriteUseCase {
        recipes: state.recipe_repo(),
        favorites: state.favorite_repo(),
    };
    uc.execute(identity.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
