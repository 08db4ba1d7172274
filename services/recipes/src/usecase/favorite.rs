use uuid::Uuid;

use crate::domain::repository::{FavoriteRepository, RecipeSummaryPort};
use crate::domain::types::RecipeSummary;
use crate::error::RecipesServiceError;

// ── AddFavorite ──────────────────────────────────────────────────────────────

pub struct AddFavoriteUseCase<R: RecipeSummaryPort, F: FavoriteRepository> {
    pub recipes: R,
    pub favorites: F,
}

impl<R: RecipeSummaryPort, F: FavoriteRepository> AddFavoriteUseCase<R, F> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<RecipeSummary, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_summary(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if !self.favorites.insert_if_absent(user_id, recipe_id).await? {
            return Err(RecipesServiceError::AlreadyFavorited);
        }
        tracing::info!(%user_id, recipe_id, "recipe favorited");
        Ok(recipe)
    }
}

// ── RemoveFavorite ───────────────────────────────────────────────────────────

pub struct RemoveFavoriteUseCase<R: RecipeSummaryPort, F: FavoriteRepository> {
    pub recipes: R,
    pub favorites: F,
}

impl<R: RecipeSummaryPort, F: FavoriteRepository> RemoveFavoriteUseCase<R, F> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
        if self.recipes.find_summary(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        if !self.favorites.delete(user_id, recipe_id).await? {
            return Err(RecipesServiceError::FavoriteNotFound);
        }
        tracing::info!(%user_id, recipe_id, "recipe unfavorited");
        Ok(())
    }
}
