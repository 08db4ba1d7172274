use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::error::RecipesServiceError;
use crate::handlers::recipe::RecipeSummaryResponse;
use crate::state::AppState;
use crate::usecase::shopping_cart::{
    AddToShoppingCartUseCase, BuildShoppingListUseCase, RemoveFromShoppingCartUseCase,
};

pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

// ── GET /recipes/download_shopping_cart/ ─────────────────────────────────────

pub async fn download_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Response, RecipesServiceError> {
    let uc = BuildShoppingListUseCase {
        carts: state.cart_repo(),
    };
    let list = uc.execute(identity.user_id).await?;
    let disposition = format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        list.render(),
    )
        .into_response())
}

// ── POST /recipes/{id}/shopping_cart ─────────────────────────────────────────

pub async fn add_to_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), RecipesServiceError> {
    let uc = AddToShoppingCartUseCase {
        recipes: state.recipe_repo(),
        carts: state.cart_repo(),
    };
    let summary = uc.execute(identity.user_id, recipe_id).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

// ── DELETE /recipes/{id}/shopping_cart ───────────────────────────────────────

pub async fn remove_from_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = RemoveFromShoppingCartUseCase {
        recipes: state.recipe_repo(),
        carts: state.cart_repo(),
    };
    uc.execute(identity.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
