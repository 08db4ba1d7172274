use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::{
    IngredientAmount, NewRecipe, RecipeIngredient, RecipePatch, RecipeSummary, RecipeView,
};
use crate::error::RecipesServiceError;
use crate::handlers::tag::TagResponse;
use crate::handlers::user::UserResponse;
use crate::handlers::{parse_flag, parse_query};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesInput,
    ListRecipesUseCase, UpdateRecipeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(item: RecipeIngredient) -> Self {
        Self {
            id: item.id,
            name: item.name,
            measurement_unit: item.measurement_unit,
            amount: item.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    #[serde(serialize_with = "foodgram_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        Self {
            id: view.id,
            tags: view.tags.into_iter().map(TagResponse::from).collect(),
            author: view.author.into(),
            ingredients: view
                .ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
            name: view.name,
            image: view.image,
            text: view.text,
            cooking_time: view.cooking_time,
            created_at: view.created_at,
        }
    }
}

/// Short form returned by cart, favorite and subscription endpoints.
#[derive(Debug, Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            image: summary.image,
            cooking_time: summary.cooking_time,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RecipeListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub author: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn get_recipes(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<RecipeResponse>>, RecipesServiceError> {
    let query: RecipeListQuery = parse_query(raw_query.as_deref())?;
    let input = ListRecipesInput {
        author_id: query.author,
        tag_slugs: query.tags,
        is_favorited: parse_flag(query.is_favorited.as_deref())?,
        is_in_shopping_cart: parse_flag(query.is_in_shopping_cart.as_deref())?,
    };
    let uc = ListRecipesUseCase {
        recipes: state.recipe_repo(),
    };
    let views = uc
        .execute(
            identity.map(|i| i.user_id),
            input,
            PageRequest::from_query(query.per_page, query.page),
        )
        .await?;
    Ok(Json(views.into_iter().map(RecipeResponse::from).collect()))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let uc = GetRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let view = uc.execute(identity.map(|i| i.user_id), id).await?;
    Ok(Json(view.into()))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i32,
}

impl From<IngredientAmountRequest> for IngredientAmount {
    fn from(req: IngredientAmountRequest) -> Self {
        Self {
            ingredient_id: req.id,
            amount: req.amount,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<IngredientAmountRequest>,
    #[serde(default)]
    pub tags: Vec<i32>,
    pub image: String,
    pub name: String,
    #[serde(default)]
    pub text: String,
    pub cooking_time: i32,
}

pub async fn create_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), RecipesServiceError> {
    let uc = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        tags: state.tag_repo(),
    };
    let view = uc
        .execute(NewRecipe {
            author_id: identity.user_id,
            name: body.name,
            image: body.image,
            text: body.text,
            cooking_time: body.cooking_time,
            ingredients: body.ingredients.into_iter().map(Into::into).collect(),
            tag_ids: body.tags,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRecipeRequest {
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    pub tags: Option<Vec<i32>>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

pub async fn update_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let uc = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        tags: state.tag_repo(),
    };
    let patch = RecipePatch {
        name: body.name,
        image: body.image,
        text: body.text,
        cooking_time: body.cooking_time,
        ingredients: body
            .ingredients
            .map(|items| items.into_iter().map(Into::into).collect()),
        tag_ids: body.tags,
    };
    let view = uc
        .execute(identity.user_id, identity.is_admin(), id, patch)
        .await?;
    Ok(Json(view.into()))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    uc.execute(identity.user_id, identity.is_admin(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
