use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, UserProfile};
use crate::error::RecipesServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    pub async fn execute(&self, input: NewUser) -> Result<UserProfile, RecipesServiceError> {
        input.validate()?;
        let user = self.users.create(&input).await?;
        tracing::info!(user_id = %user.id, "user profile created");
        Ok(UserProfile::new(user, false))
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        id: Uuid,
    ) -> Result<UserProfile, RecipesServiceError> {
        self.users
            .find_profile(id, viewer)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetMeUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<UserProfile, RecipesServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        Ok(UserProfile::new(user, false))
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<UserProfile>, RecipesServiceError> {
        self.users.list_profiles(viewer, page).await
    }
}
