use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;

use crate::domain::repository::{IngredientRepository, RecipeRepository, TagRepository};
use crate::domain::types::{
    IngredientAmount, NewRecipe, Recipe, RecipeFilter, RecipePatch, RecipeView,
};
use crate::error::RecipesServiceError;

async fn ensure_ingredients_exist<I: IngredientRepository>(
    ingredients: &I,
    items: &[IngredientAmount],
) -> Result<(), RecipesServiceError> {
    let ids: Vec<i32> = items.iter().map(|i| i.ingredient_id).collect();
    let found = ingredients.find_by_ids(&ids).await?;
    if found.len() != ids.len() {
        return Err(RecipesServiceError::IngredientNotFound);
    }
    Ok(())
}

async fn ensure_tags_exist<T: TagRepository>(
    tags: &T,
    tag_ids: &[i32],
) -> Result<(), RecipesServiceError> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let found = tags.find_by_ids(tag_ids).await?;
    if found.len() != tag_ids.len() {
        return Err(RecipesServiceError::TagNotFound);
    }
    Ok(())
}

/// Only the author or an administrator may change a recipe.
fn ensure_can_edit(
    recipe: &Recipe,
    user_id: Uuid,
    is_admin: bool,
) -> Result<(), RecipesServiceError> {
    if recipe.author_id == user_id || is_admin {
        Ok(())
    } else {
        Err(RecipesServiceError::Forbidden)
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R: RecipeRepository, I: IngredientRepository, T: TagRepository> {
    pub recipes: R,
    pub ingredients: I,
    pub tags: T,
}

impl<R: RecipeRepository, I: IngredientRepository, T: TagRepository> CreateRecipeUseCase<R, I, T> {
    pub async fn execute(&self, input: NewRecipe) -> Result<RecipeView, RecipesServiceError> {
        input.validate()?;
        ensure_ingredients_exist(&self.ingredients, &input.ingredients).await?;
        ensure_tags_exist(&self.tags, &input.tag_ids).await?;

        let id = self.recipes.create(&input).await?;
        tracing::info!(recipe_id = id, author_id = %input.author_id, "recipe created");
        self.recipes
            .find_view(id, Some(input.author_id))
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> GetRecipeUseCase<R> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        id: i32,
    ) -> Result<RecipeView, RecipesServiceError> {
        self.recipes
            .find_view(id, viewer)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ListRecipesInput {
    pub author_id: Option<Uuid>,
    pub tag_slugs: Vec<String>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        input: ListRecipesInput,
        page: PageRequest,
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        let mut filter = RecipeFilter {
            author_id: input.author_id,
            tag_slugs: input.tag_slugs,
            ..Default::default()
        };
        // An anonymous viewer has neither favorites nor a cart.
        if input.is_favorited == Some(true) {
            match viewer {
                Some(user_id) => filter.favorited_by = Some(user_id),
                None => return Ok(Vec::new()),
            }
        }
        if input.is_in_shopping_cart == Some(true) {
            match viewer {
                Some(user_id) => filter.in_cart_of = Some(user_id),
                None => return Ok(Vec::new()),
            }
        }
        self.recipes.list_views(&filter, viewer, page).await
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R: RecipeRepository, I: IngredientRepository, T: TagRepository> {
    pub recipes: R,
    pub ingredients: I,
    pub tags: T,
}

impl<R: RecipeRepository, I: IngredientRepository, T: TagRepository> UpdateRecipeUseCase<R, I, T> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        is_admin: bool,
        id: i32,
        patch: RecipePatch,
    ) -> Result<RecipeView, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        ensure_can_edit(&recipe, user_id, is_admin)?;
        patch.validate()?;
        if let Some(items) = &patch.ingredients {
            ensure_ingredients_exist(&self.ingredients, items).await?;
        }
        if let Some(tag_ids) = &patch.tag_ids {
            ensure_tags_exist(&self.tags, tag_ids).await?;
        }

        self.recipes.update(id, &patch).await?;
        tracing::info!(recipe_id = id, %user_id, "recipe updated");
        self.recipes
            .find_view(id, Some(user_id))
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        is_admin: bool,
        id: i32,
    ) -> Result<(), RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        ensure_can_edit(&recipe, user_id, is_admin)?;
        if !self.recipes.delete(id).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        tracing::info!(recipe_id = id, %user_id, "recipe deleted");
        Ok(())
    }
}
