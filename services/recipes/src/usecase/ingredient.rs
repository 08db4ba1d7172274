use crate::domain::repository::IngredientRepository;
use crate::domain::types::{Ingredient, NewIngredient};
use crate::error::RecipesServiceError;

pub struct ListIngredientsUseCase<I: IngredientRepository> {
    pub ingredients: I,
}

impl<I: IngredientRepository> ListIngredientsUseCase<I> {
    pub async fn execute(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = name_prefix.map(str::trim).filter(|p| !p.is_empty());
        self.ingredients.list(prefix).await
    }
}

pub struct GetIngredientUseCase<I: IngredientRepository> {
    pub ingredients: I,
}

impl<I: IngredientRepository> GetIngredientUseCase<I> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, RecipesServiceError> {
        self.ingredients
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::IngredientNotFound)
    }
}

/// Bulk catalog load used by the `import-ingredients` binary.
pub struct ImportIngredientsUseCase<I: IngredientRepository> {
    pub ingredients: I,
}

impl<I: IngredientRepository> ImportIngredientsUseCase<I> {
    pub async fn execute(&self, items: Vec<NewIngredient>) -> Result<u64, RecipesServiceError> {
        let items: Vec<NewIngredient> = items
            .into_iter()
            .map(|item| NewIngredient {
                name: item.name.trim().to_owned(),
                measurement_unit: item.measurement_unit.trim().to_owned(),
            })
            .collect();
        if items
            .iter()
            .any(|item| item.name.is_empty() || item.measurement_unit.is_empty())
        {
            return Err(RecipesServiceError::MissingData);
        }
        if items.is_empty() {
            return Ok(0);
        }
        let inserted = self.ingredients.insert_many(&items).await?;
        tracing::info!(inserted, "imported ingredients");
        Ok(inserted)
    }
}
