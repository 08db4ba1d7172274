#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::domain::repository::{
    FavoriteRepository, IngredientRepository, RecipeRepository, RecipeSummaryPort,
    SubscriptionRepository, TagRepository, UserRepository,
};
use foodgram_recipes::domain::types::{
    Ingredient, NewIngredient, NewRecipe, NewTag, NewUser, Recipe, RecipeFilter, RecipePatch,
    RecipeSummary, RecipeView, SubscribedAuthor, Tag, User, UserProfile,
};
use foodgram_recipes::error::RecipesServiceError;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(username: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        created_at: Utc::now(),
    }
}

pub fn test_recipe(id: i32, author_id: Uuid) -> Recipe {
    Recipe {
        id,
        author_id,
        name: format!("Recipe {id}"),
        image: format!("recipes/images/{id}.png"),
        text: "Cook it.".to_owned(),
        cooking_time: 15,
        created_at: Utc::now(),
    }
}

pub fn ingredient(id: i32, name: &str, unit: &str) -> Ingredient {
    Ingredient {
        id,
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

pub fn tag(id: i32, slug: &str) -> Tag {
    Tag {
        id,
        name: slug.to_uppercase(),
        color: "#49B64E".to_owned(),
        slug: slug.to_owned(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockUserRepo {
    pub users: Mutex<Vec<User>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_profile(
        &self,
        id: Uuid,
        _viewer: Option<Uuid>,
    ) -> Result<Option<UserProfile>, RecipesServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(|u| UserProfile::new(u, false)))
    }

    async fn list_profiles(
        &self,
        _viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<UserProfile>, RecipesServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .map(|u| UserProfile::new(u, false))
            .collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, RecipesServiceError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.id == user.id || u.email == user.email || u.username == user.username)
        {
            return Err(RecipesServiceError::UserAlreadyExists);
        }
        let created = User {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }
}

// ── MockIngredientRepo ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockIngredientRepo {
    pub ingredients: Vec<Ingredient>,
    pub imported: Arc<Mutex<Vec<NewIngredient>>>,
}

impl MockIngredientRepo {
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        Self {
            ingredients,
            imported: Arc::default(),
        }
    }
}

impl IngredientRepository for MockIngredientRepo {
    async fn list(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = name_prefix.map(str::to_lowercase);
        Ok(self
            .ingredients
            .iter()
            .filter(|i| match &prefix {
                Some(p) => i.name.to_lowercase().starts_with(p),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        Ok(self.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        Ok(self
            .ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn insert_many(&self, items: &[NewIngredient]) -> Result<u64, RecipesServiceError> {
        self.imported.lock().unwrap().extend_from_slice(items);
        Ok(items.len() as u64)
    }
}

// ── MockTagRepo ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockTagRepo {
    pub tags: Mutex<Vec<Tag>>,
}

impl MockTagRepo {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self {
            tags: Mutex::new(tags),
        }
    }
}

impl TagRepository for MockTagRepo {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        Ok(self.tags.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn create(&self, tag: &NewTag) -> Result<Tag, RecipesServiceError> {
        let mut tags = self.tags.lock().unwrap();
        if tags.iter().any(|t| t.name == tag.name || t.slug == tag.slug) {
            return Err(RecipesServiceError::TagAlreadyExists);
        }
        let created = Tag {
            id: tags.len() as i32 + 1,
            name: tag.name.clone(),
            color: tag.color.clone(),
            slug: tag.slug.clone(),
        };
        tags.push(created.clone());
        Ok(created)
    }
}

// ── MockRecipeRepo ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockRecipeRepo {
    pub recipes: Mutex<Vec<Recipe>>,
    pub created: Mutex<Vec<NewRecipe>>,
    pub updated: Mutex<Vec<(i32, RecipePatch)>>,
    pub last_filter: Mutex<Option<RecipeFilter>>,
}

impl MockRecipeRepo {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Mutex::new(recipes),
            ..Default::default()
        }
    }

    fn view(recipe: Recipe) -> RecipeView {
        let mut author = test_user("author");
        author.id = recipe.author_id;
        RecipeView {
            id: recipe.id,
            author: UserProfile::new(author, false),
            tags: Vec::new(),
            ingredients: Vec::new(),
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            created_at: recipe.created_at,
            is_favorited: false,
            is_in_shopping_cart: false,
        }
    }
}

impl RecipeRepository for MockRecipeRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        Ok(self.recipes.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_view(
        &self,
        id: i32,
        _viewer: Option<Uuid>,
    ) -> Result<Option<RecipeView>, RecipesServiceError> {
        Ok(self.find_by_id(id).await?.map(Self::view))
    }

    async fn list_views(
        &self,
        filter: &RecipeFilter,
        _viewer: Option<Uuid>,
        _page: PageRequest,
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        *self.last_filter.lock().unwrap() = Some(filter.clone());
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.author_id.is_none_or(|a| a == r.author_id))
            .cloned()
            .map(Self::view)
            .collect())
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<i32, RecipesServiceError> {
        let mut recipes = self.recipes.lock().unwrap();
        let id = recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        recipes.push(Recipe {
            id,
            author_id: recipe.author_id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            text: recipe.text.clone(),
            cooking_time: recipe.cooking_time,
            created_at: Utc::now(),
        });
        self.created.lock().unwrap().push(recipe.clone());
        Ok(id)
    }

    async fn update(&self, id: i32, patch: &RecipePatch) -> Result<(), RecipesServiceError> {
        let mut recipes = self.recipes.lock().unwrap();
        if let Some(recipe) = recipes.iter_mut().find(|r| r.id == id) {
            if let Some(name) = &patch.name {
                recipe.name = name.clone();
            }
            if let Some(cooking_time) = patch.cooking_time {
                recipe.cooking_time = cooking_time;
            }
        }
        self.updated.lock().unwrap().push((id, patch.clone()));
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let mut recipes = self.recipes.lock().unwrap();
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        Ok(recipes.len() < before)
    }
}

impl RecipeSummaryPort for MockRecipeRepo {
    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, RecipesServiceError> {
        Ok(self.find_by_id(id).await?.map(RecipeSummary::from))
    }
}

// ── MockFavoriteRepo ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockFavoriteRepo {
    pub entries: Mutex<HashSet<(Uuid, i32)>>,
}

impl FavoriteRepository for MockFavoriteRepo {
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        Ok(self.entries.lock().unwrap().insert((user_id, recipe_id)))
    }

    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        Ok(self.entries.lock().unwrap().remove(&(user_id, recipe_id)))
    }
}

// ── MockSubscriptionRepo ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockSubscriptionRepo {
    pub entries: Mutex<Vec<(Uuid, Uuid)>>,
    pub authors: Vec<User>,
}

impl MockSubscriptionRepo {
    pub fn new(authors: Vec<User>) -> Self {
        Self {
            entries: Mutex::default(),
            authors,
        }
    }

    fn subscribed_author(&self, author: &User, is_subscribed: bool) -> SubscribedAuthor {
        SubscribedAuthor {
            author: UserProfile::new(author.clone(), is_subscribed),
            recipes: Vec::new(),
            recipes_count: 0,
        }
    }
}

impl SubscriptionRepository for MockSubscriptionRepo {
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains(&(user_id, author_id)) {
            return Ok(false);
        }
        entries.push((user_id, author_id));
        Ok(true)
    }

    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| *e != (user_id, author_id));
        Ok(entries.len() < before)
    }

    async fn list_authors(
        &self,
        user_id: Uuid,
        _page: PageRequest,
        _recipes_limit: Option<u64>,
    ) -> Result<Vec<SubscribedAuthor>, RecipesServiceError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .rev()
            .filter(|(follower, _)| *follower == user_id)
            .filter_map(|(_, author_id)| self.authors.iter().find(|a| a.id == *author_id))
            .map(|a| self.subscribed_author(a, true))
            .collect())
    }

    async fn find_author(
        &self,
        user_id: Uuid,
        author_id: Uuid,
        _recipes_limit: Option<u64>,
    ) -> Result<Option<SubscribedAuthor>, RecipesServiceError> {
        let is_subscribed = self
            .entries
            .lock()
            .unwrap()
            .contains(&(user_id, author_id));
        Ok(self
            .authors
            .iter()
            .find(|a| a.id == author_id)
            .map(|a| self.subscribed_author(a, is_subscribed)))
    }
}
