use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::{NewUser, UserProfile};
use crate::error::RecipesServiceError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::user::{CreateUserUseCase, GetMeUseCase, GetUserUseCase, ListUsersUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            email: profile.email,
            id: profile.id,
            username: profile.username,
            first_name: profile.first_name,
            last_name: profile.last_name,
            is_subscribed: profile.is_subscribed,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), RecipesServiceError> {
    let uc = CreateUserUseCase {
        users: state.user_repo(),
    };
    let profile = uc
        .execute(NewUser {
            id: identity.user_id,
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn get_users(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<UserResponse>>, RecipesServiceError> {
    let query: UserListQuery = parse_query(raw_query.as_deref())?;
    let uc = ListUsersUseCase {
        users: state.user_repo(),
    };
    let profiles = uc
        .execute(
            identity.map(|i| i.user_id),
            PageRequest::from_query(query.per_page, query.page),
        )
        .await?;
    Ok(Json(profiles.into_iter().map(UserResponse::from).collect()))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let uc = GetMeUseCase {
        users: state.user_repo(),
    };
    let profile = uc.execute(identity.user_id).await?;
    Ok(Json(profile.into()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let uc = GetUserUseCase {
        users: state.user_repo(),
    };
    let profile = uc.execute(identity.map(|i| i.user_id), id).await?;
    Ok(Json(profile.into()))
}
