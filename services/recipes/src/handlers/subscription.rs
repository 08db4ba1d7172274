use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::SubscribedAuthor;
use crate::error::RecipesServiceError;
use crate::handlers::parse_query;
use crate::handlers::recipe::RecipeSummaryResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

#[derive(Debug, Serialize)]
pub struct SubscribedAuthorResponse {
    #[serde(flatten)]
    pub author: UserResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: u64,
}

impl From<SubscribedAuthor> for SubscribedAuthorResponse {
    fn from(item: SubscribedAuthor) -> Self {
        Self {
            author: item.author.into(),
            recipes: item
                .recipes
                .into_iter()
                .map(RecipeSummaryResponse::from)
                .collect(),
            recipes_count: item.recipes_count,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SubscriptionQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub recipes_limit: Option<u64>,
}

// ── GET /users/subscriptions ─────────────────────────────────────────────────

pub async fn get_subscriptions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<SubscribedAuthorResponse>>, RecipesServiceError> {
    let query: SubscriptionQuery = parse_query(raw_query.as_deref())?;
    let uc = ListSubscriptionsUseCase {
        subscriptions: state.subscription_repo(),
    };
    let authors = uc
        .execute(
            identity.user_id,
            PageRequest::from_query(query.per_page, query.page),
            query.recipes_limit,
        )
        .await?;
    Ok(Json(
        authors
            .into_iter()
            .map(SubscribedAuthorResponse::from)
            .collect(),
    ))
}

// ── POST /users/{id}/subscribe ───────────────────────────────────────────────

pub async fn subscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    RawQuery(raw_query): RawQuery,
) -> Result<(StatusCode, Json<SubscribedAuthorResponse>), RecipesServiceError> {
    let query: SubscriptionQuery = parse_query(raw_query.as_deref())?;
    let uc = SubscribeUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let author = uc
        .execute(identity.user_id, author_id, query.recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(author.into())))
}

// ── DELETE /users/{id}/subscribe ─────────────────────────────────────────────

pub async fn unsubscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = UnsubscribeUseCase {
        subscriptions: state.subscription_repo(),
    };
    uc.execute(identity.user_id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
