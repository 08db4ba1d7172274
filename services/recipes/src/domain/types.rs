use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::RecipesServiceError;

pub const RECIPE_NAME_MAX_CHARS: usize = 200;
pub const RECIPE_TEXT_MAX_CHARS: usize = 1200;
pub const USERNAME_MAX_CHARS: usize = 150;
pub const PERSON_NAME_MAX_CHARS: usize = 150;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const TAG_NAME_MAX_CHARS: usize = 200;
pub const TAG_SLUG_MAX_CHARS: usize = 200;

// ── Users ────────────────────────────────────────────────────────────────────

/// User profile record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// A user as seen by a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// The viewer follows this user. Always `false` for anonymous viewers.
    pub is_subscribed: bool,
}

impl UserProfile {
    pub fn new(user: User, is_subscribed: bool) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), RecipesServiceError> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_person_name(&self.first_name)?;
        validate_person_name(&self.last_name)
    }
}

fn validate_username(username: &str) -> Result<(), RecipesServiceError> {
    let valid = !username.is_empty()
        && username.chars().count() <= USERNAME_MAX_CHARS
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '+' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(RecipesServiceError::InvalidUsername)
    }
}

fn validate_email(email: &str) -> Result<(), RecipesServiceError> {
    if email.chars().count() > EMAIL_MAX_CHARS || email.chars().any(char::is_whitespace) {
        return Err(RecipesServiceError::InvalidEmail);
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.') =>
        {
            Ok(())
        }
        _ => Err(RecipesServiceError::InvalidEmail),
    }
}

fn validate_person_name(name: &str) -> Result<(), RecipesServiceError> {
    let len = name.trim().chars().count();
    if len == 0 || name.chars().count() > PERSON_NAME_MAX_CHARS {
        return Err(RecipesServiceError::InvalidPersonName);
    }
    Ok(())
}

// ── Catalogs ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// Catalog row to import.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl NewTag {
    pub fn validate(&self) -> Result<(), RecipesServiceError> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 || self.name.chars().count() > TAG_NAME_MAX_CHARS {
            return Err(RecipesServiceError::MissingData);
        }
        if !is_hex_color(&self.color) {
            return Err(RecipesServiceError::InvalidTagColor);
        }
        let slug_ok = !self.slug.is_empty()
            && self.slug.len() <= TAG_SLUG_MAX_CHARS
            && self
                .slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !slug_ok {
            return Err(RecipesServiceError::InvalidTagSlug);
        }
        Ok(())
    }
}

/// `#RRGGBB`
fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

// ── Recipes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author_id: Uuid,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

/// Compact recipe representation used by cart, favorites and subscriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// One ingredient of a recipe together with its quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// A recipe as seen by a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub id: i32,
    pub author: UserProfile,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Requested quantity of one ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: Uuid,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientAmount>,
    pub tag_ids: Vec<i32>,
}

impl NewRecipe {
    pub fn validate(&self) -> Result<(), RecipesServiceError> {
        validate_recipe_name(&self.name)?;
        validate_image(&self.image)?;
        validate_text(&self.text)?;
        validate_cooking_time(self.cooking_time)?;
        validate_ingredients(&self.ingredients)?;
        validate_tag_ids(&self.tag_ids)
    }
}

/// Partial recipe update. `None` leaves the field unchanged; `Some` for
/// `ingredients` or `tag_ids` replaces the whole set.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub ingredients: Option<Vec<IngredientAmount>>,
    pub tag_ids: Option<Vec<i32>>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.image.is_none()
            && self.text.is_none()
            && self.cooking_time.is_none()
            && self.ingredients.is_none()
            && self.tag_ids.is_none()
    }

    pub fn validate(&self) -> Result<(), RecipesServiceError> {
        if self.is_empty() {
            return Err(RecipesServiceError::MissingData);
        }
        if let Some(name) = &self.name {
            validate_recipe_name(name)?;
        }
        if let Some(image) = &self.image {
            validate_image(image)?;
        }
        if let Some(text) = &self.text {
            validate_text(text)?;
        }
        if let Some(cooking_time) = self.cooking_time {
            validate_cooking_time(cooking_time)?;
        }
        if let Some(ingredients) = &self.ingredients {
            validate_ingredients(ingredients)?;
        }
        if let Some(tag_ids) = &self.tag_ids {
            validate_tag_ids(tag_ids)?;
        }
        Ok(())
    }
}

fn validate_recipe_name(name: &str) -> Result<(), RecipesServiceError> {
    let len = name.trim().chars().count();
    if len == 0 || name.chars().count() > RECIPE_NAME_MAX_CHARS {
        return Err(RecipesServiceError::InvalidRecipeName);
    }
    Ok(())
}

fn validate_image(image: &str) -> Result<(), RecipesServiceError> {
    if image.trim().is_empty() {
        return Err(RecipesServiceError::MissingImage);
    }
    Ok(())
}

fn validate_text(text: &str) -> Result<(), RecipesServiceError> {
    if text.chars().count() > RECIPE_TEXT_MAX_CHARS {
        return Err(RecipesServiceError::RecipeTextTooLong);
    }
    Ok(())
}

fn validate_cooking_time(cooking_time: i32) -> Result<(), RecipesServiceError> {
    if cooking_time < 1 {
        return Err(RecipesServiceError::InvalidCookingTime);
    }
    Ok(())
}

fn validate_ingredients(ingredients: &[IngredientAmount]) -> Result<(), RecipesServiceError> {
    if ingredients.is_empty() {
        return Err(RecipesServiceError::MissingIngredients);
    }
    let mut seen = HashSet::with_capacity(ingredients.len());
    for item in ingredients {
        if item.amount < 1 {
            return Err(RecipesServiceError::InvalidAmount);
        }
        if !seen.insert(item.ingredient_id) {
            return Err(RecipesServiceError::DuplicateIngredient);
        }
    }
    Ok(())
}

fn validate_tag_ids(tag_ids: &[i32]) -> Result<(), RecipesServiceError> {
    let mut seen = HashSet::with_capacity(tag_ids.len());
    if tag_ids.iter().all(|id| seen.insert(*id)) {
        Ok(())
    } else {
        Err(RecipesServiceError::DuplicateTag)
    }
}

/// Recipe list filter, already resolved against the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<Uuid>,
    /// Match recipes carrying any of these tag slugs. Empty means no filter.
    pub tag_slugs: Vec<String>,
    /// Only recipes this user has favorited.
    pub favorited_by: Option<Uuid>,
    /// Only recipes in this user's shopping cart.
    pub in_cart_of: Option<Uuid>,
}

// ── Subscriptions ────────────────────────────────────────────────────────────

/// An author the viewer follows, with a preview of their recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribedAuthor {
    pub author: UserProfile,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}
