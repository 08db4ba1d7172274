use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;

use crate::domain::repository::{SubscriptionRepository, UserRepository};
use crate::domain::types::SubscribedAuthor;
use crate::error::RecipesServiceError;

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> SubscribeUseCase<U, S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<SubscribedAuthor, RecipesServiceError> {
        if user_id == author_id {
            return Err(RecipesServiceError::SelfSubscription);
        }
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }
        if !self
            .subscriptions
            .insert_if_absent(user_id, author_id)
            .await?
        {
            return Err(RecipesServiceError::AlreadySubscribed);
        }
        tracing::info!(%user_id, %author_id, "subscribed to author");
        self.subscriptions
            .find_author(user_id, author_id, recipes_limit)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<S: SubscriptionRepository> {
    pub subscriptions: S,
}

impl<S: SubscriptionRepository> UnsubscribeUseCase<S> {
    pub async fn execute(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RecipesServiceError> {
        if !self.subscriptions.delete(user_id, author_id).await? {
            return Err(RecipesServiceError::SubscriptionNotFound);
        }
        tracing::info!(%user_id, %author_id, "unsubscribed from author");
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<S: SubscriptionRepository> {
    pub subscriptions: S,
}

impl<S: SubscriptionRepository> ListSubscriptionsUseCase<S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Vec<SubscribedAuthor>, RecipesServiceError> {
        self.subscriptions
            .list_authors(user_id, page, recipes_limit)
            .await
    }
}
