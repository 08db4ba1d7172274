#![allow(async_fn_in_trait)]

use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_domain::shopping_list::ShoppingListLine;

use crate::domain::types::{
    Ingredient, NewIngredient, NewRecipe, NewTag, NewUser, Recipe, RecipeFilter, RecipePatch,
    RecipeSummary, RecipeView, SubscribedAuthor, Tag, User, UserProfile,
};
use crate::error::RecipesServiceError;

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError>;

    /// `viewer` decides `is_subscribed`.
    async fn find_profile(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<Option<UserProfile>, RecipesServiceError>;

    async fn list_profiles(
        &self,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<UserProfile>, RecipesServiceError>;

    /// Fails with `UserAlreadyExists` on a duplicate id, email or username.
    async fn create(&self, user: &NewUser) -> Result<User, RecipesServiceError>;
}

/// Repository for the ingredient catalog.
pub trait IngredientRepository: Send + Sync {
    /// Case-insensitive name prefix search, ordered by name then id.
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError>;

    /// Insert all rows in one transaction. Returns the number inserted.
    async fn insert_many(&self, items: &[NewIngredient]) -> Result<u64, RecipesServiceError>;
}

/// Repository for tags.
pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError>;

    /// Fails with `TagAlreadyExists` on a duplicate name or slug.
    async fn create(&self, tag: &NewTag) -> Result<Tag, RecipesServiceError>;
}

/// Repository for recipes and their ingredient and tag composition.
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError>;

    async fn find_view(
        &self,
        id: i32,
        viewer: Option<Uuid>,
    ) -> Result<Option<RecipeView>, RecipesServiceError>;

    /// Newest first.
    async fn list_views(
        &self,
        filter: &RecipeFilter,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<RecipeView>, RecipesServiceError>;

    /// Write the recipe with its ingredient and tag rows atomically. Returns the new id.
    async fn create(&self, recipe: &NewRecipe) -> Result<i32, RecipesServiceError>;

    /// Apply `patch` atomically, replacing ingredient or tag rows when present.
    async fn update(&self, id: i32, patch: &RecipePatch) -> Result<(), RecipesServiceError>;

    /// Delete a recipe. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError>;
}

/// Repository for shopping cart entries.
pub trait ShoppingCartRepository: Send + Sync {
    /// Insert unless already present. Returns `true` if a row was inserted.
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// Delete a cart entry. Returns `true` if a row was deleted.
    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError>;

    /// Ingredient totals over every recipe in the user's cart, one line per
    /// `(name, measurement_unit)`. Order is unspecified.
    async fn sum_ingredients(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingListLine>, RecipesServiceError>;
}

/// Repository for favorite recipes.
pub trait FavoriteRepository: Send + Sync {
    /// Insert unless already present. Returns `true` if a row was inserted.
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// Delete a favorite. Returns `true` if a row was deleted.
    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError>;
}

/// Repository for author subscriptions.
pub trait SubscriptionRepository: Send + Sync {
    /// Insert unless already present. Returns `true` if a row was inserted.
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError>;

    /// Delete a subscription. Returns `true` if a row was deleted.
    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError>;

    /// Authors `user_id` follows, newest subscription first.
    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Vec<SubscribedAuthor>, RecipesServiceError>;

    /// `author_id` as seen by `user_id`, with up to `recipes_limit` recipes.
    async fn find_author(
        &self,
        user_id: Uuid,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<Option<SubscribedAuthor>, RecipesServiceError>;
}

/// Lookup of recipe summaries, shared by cart and favorites.
pub trait RecipeSummaryPort: Send + Sync {
    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, RecipesServiceError>;
}
