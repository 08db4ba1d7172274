use uuid::Uuid;

use foodgram_domain::shopping_list::ShoppingList;

use crate::domain::repository::{RecipeSummaryPort, ShoppingCartRepository};
use crate::domain::types::RecipeSummary;
use crate::error::RecipesServiceError;

// ── BuildShoppingList ────────────────────────────────────────────────────────

pub struct BuildShoppingListUseCase<C: ShoppingCartRepository> {
    pub carts: C,
}

impl<C: ShoppingCartRepository> BuildShoppingListUseCase<C> {
    /// Sum every ingredient across the recipes in the user's cart.
    ///
    /// The repository already groups by `(name, measurement_unit)`;
    /// `ShoppingList::aggregate` fixes the final order independently of the
    /// database collation.
    pub async fn execute(&self, user_id: Uuid) -> Result<ShoppingList, RecipesServiceError> {
        let rows = self.carts.sum_ingredients(user_id).await?;
        let list = ShoppingList::aggregate(rows);
        tracing::debug!(%user_id, lines = list.lines().len(), "built shopping list");
        Ok(list)
    }
}

// ── AddToShoppingCart ────────────────────────────────────────────────────────

pub struct AddToShoppingCartUseCase<R: RecipeSummaryPort, C: ShoppingCartRepository> {
    pub recipes: R,
    pub carts: C,
}

impl<R: RecipeSummaryPort, C: ShoppingCartRepository> AddToShoppingCartUseCase<R, C> {
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
        if !self.carts.insert_if_absent(user_id, recipe_id).await? {
            return Err(RecipesServiceError::AlreadyInShoppingCart);
        }
        tracing::info!(%user_id, recipe_id, "recipe added to shopping cart");
        Ok(recipe)
    }
}

// ── RemoveFromShoppingCart ───────────────────────────────────────────────────

pub struct RemoveFromShoppingCartUseCase<R: RecipeSummaryPort, C: ShoppingCartRepository> {
    pub recipes: R,
    pub carts: C,
}

impl<R: RecipeSummaryPort, C: ShoppingCartRepository> RemoveFromShoppingCartUseCase<R, C> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
        if self.recipes.find_summary(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        if !self.carts.delete(user_id, recipe_id).await? {
            return Err(RecipesServiceError::ShoppingCartEntryNotFound);
        }
        tracing::info!(%user_id, recipe_id, "recipe removed from shopping cart");
        Ok(())
    }
}
