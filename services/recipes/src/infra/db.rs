use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, SqlErr, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr, OnConflict, Query},
};
use uuid::Uuid;

use foodgram_core::sea_ext::PaginateExt;
use foodgram_domain::pagination::PageRequest;
use foodgram_domain::shopping_list::ShoppingListLine;
use foodgram_recipes_schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts,
    subscriptions, tags, users,
};

use crate::domain::repository::{
    FavoriteRepository, IngredientRepository, RecipeRepository, RecipeSummaryPort,
    ShoppingCartRepository, SubscriptionRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    Ingredient, IngredientAmount, NewIngredient, NewRecipe, NewTag, NewUser, Recipe,
    RecipeFilter, RecipeIngredient, RecipePatch, RecipeSummary, RecipeView, SubscribedAuthor,
    Tag, User, UserProfile,
};
use crate::error::RecipesServiceError;

const IMPORT_CHUNK_ROWS: usize = 500;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

/// Inserts keyed by the caller's user id fail on the users foreign key when
/// no profile has been registered for that id yet.
fn user_insert_error(err: DbErr, context: &'static str) -> RecipesServiceError {
    if is_foreign_key_violation(&err) {
        RecipesServiceError::UserNotFound
    } else {
        anyhow::Error::new(err).context(context).into()
    }
}

/// Escape `%`, `_` and `\` for use inside a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_profile(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<Option<UserProfile>, RecipesServiceError> {
        let Some(model) = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user profile")?
        else {
            return Ok(None);
        };
        let subscribed = subscribed_author_ids(&self.db, viewer, &[id]).await?;
        Ok(Some(UserProfile::new(
            user_from_model(model),
            subscribed.contains(&id),
        )))
    }

    async fn list_profiles(
        &self,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<UserProfile>, RecipesServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Id)
            .page(page)
            .all(&self.db)
            .await
            .context("list users")?;
        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let subscribed = subscribed_author_ids(&self.db, viewer, &ids).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let is_subscribed = subscribed.contains(&m.id);
                UserProfile::new(user_from_model(m), is_subscribed)
            })
            .collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, RecipesServiceError> {
        let model = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RecipesServiceError::UserAlreadyExists
            } else {
                anyhow::Error::new(e).context("create user").into()
            }
        })?;
        Ok(user_from_model(model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        created_at: model.created_at,
    }
}

/// Subset of `author_ids` that `viewer` follows. Empty for anonymous viewers.
async fn subscribed_author_ids<C: ConnectionTrait>(
    db: &C,
    viewer: Option<Uuid>,
    author_ids: &[Uuid],
) -> Result<HashSet<Uuid>, RecipesServiceError> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };
    if author_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let rows = subscriptions::Entity::find()
        .filter(subscriptions::Column::UserId.eq(viewer))
        .filter(subscriptions::Column::AuthorId.is_in(author_ids.iter().copied()))
        .all(db)
        .await
        .context("find viewer subscriptions")?;
    Ok(rows.into_iter().map(|r| r.author_id).collect())
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn list(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(ingredients::Column::Name)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn insert_many(&self, items: &[NewIngredient]) -> Result<u64, RecipesServiceError> {
        let txn = self.db.begin().await.context("begin ingredient import")?;
        let mut inserted = 0;
        for chunk in items.chunks(IMPORT_CHUNK_ROWS) {
            let models = chunk.iter().map(|item| ingredients::ActiveModel {
                name: Set(item.name.clone()),
                measurement_unit: Set(item.measurement_unit.clone()),
                ..Default::default()
            });
            inserted += ingredients::Entity::insert_many(models)
                .exec_without_returning(&txn)
                .await
                .context("insert ingredients")?;
        }
        txn.commit().await.context("commit ingredient import")?;
        Ok(inserted)
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn create(&self, tag: &NewTag) -> Result<Tag, RecipesServiceError> {
        let model = tags::ActiveModel {
            name: Set(tag.name.clone()),
            color: Set(tag.color.clone()),
            slug: Set(tag.slug.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RecipesServiceError::TagAlreadyExists
            } else {
                anyhow::Error::new(e).context("create tag").into()
            }
        })?;
        Ok(tag_from_model(model))
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct RecipeIngredientRow {
    recipe_id: i32,
    ingredient_id: i32,
    name: String,
    measurement_unit: String,
    amount: i32,
}

#[derive(Debug, FromQueryResult)]
struct RecipeTagRow {
    recipe_id: i32,
    id: i32,
    name: String,
    color: String,
    slug: String,
}

impl DbRecipeRepository {
    /// Build viewer-specific read models with one query per related table.
    async fn assemble_views(
        &self,
        models: Vec<recipes::Model>,
        viewer: Option<Uuid>,
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let recipe_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let author_ids: Vec<Uuid> = models
            .iter()
            .map(|m| m.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let authors: HashMap<Uuid, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find recipe authors")?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let subscribed = subscribed_author_ids(&self.db, viewer, &author_ids).await?;

        let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
        let ingredient_rows = recipe_ingredients::Entity::find()
            .select_only()
            .column(recipe_ingredients::Column::RecipeId)
            .column(recipe_ingredients::Column::IngredientId)
            .column(ingredients::Column::Name)
            .column(ingredients::Column::MeasurementUnit)
            .column(recipe_ingredients::Column::Amount)
            .join(
                JoinType::InnerJoin,
                recipe_ingredients::Relation::Ingredient.def(),
            )
            .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(recipe_ingredients::Column::IngredientId)
            .into_model::<RecipeIngredientRow>()
            .all(&self.db)
            .await
            .context("find recipe ingredients")?;
        for row in ingredient_rows {
            ingredients_by_recipe
                .entry(row.recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    id: row.ingredient_id,
                    name: row.name,
                    measurement_unit: row.measurement_unit,
                    amount: row.amount,
                });
        }

        let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
        let tag_rows = recipe_tags::Entity::find()
            .select_only()
            .column(recipe_tags::Column::RecipeId)
            .column(tags::Column::Id)
            .column(tags::Column::Name)
            .column(tags::Column::Color)
            .column(tags::Column::Slug)
            .join(JoinType::InnerJoin, recipe_tags::Relation::Tag.def())
            .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .order_by_asc(tags::Column::Id)
            .into_model::<RecipeTagRow>()
            .all(&self.db)
            .await
            .context("find recipe tags")?;
        for row in tag_rows {
            tags_by_recipe.entry(row.recipe_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
                color: row.color,
                slug: row.slug,
            });
        }

        let (favorited, in_cart) = match viewer {
            Some(user_id) => {
                let favorited: HashSet<i32> = favorites::Entity::find()
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                    .all(&self.db)
                    .await
                    .context("find viewer favorites")?
                    .into_iter()
                    .map(|f| f.recipe_id)
                    .collect();
                let in_cart: HashSet<i32> = shopping_carts::Entity::find()
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                    .all(&self.db)
                    .await
                    .context("find viewer shopping cart")?
                    .into_iter()
                    .map(|c| c.recipe_id)
                    .collect();
                (favorited, in_cart)
            }
            None => (HashSet::new(), HashSet::new()),
        };

        let mut views = Vec::with_capacity(models.len());
        for model in models {
            let author = authors
                .get(&model.author_id)
                .cloned()
                .with_context(|| {
                    format!("author {} of recipe {} missing", model.author_id, model.id)
                })?;
            views.push(RecipeView {
                id: model.id,
                author: UserProfile::new(
                    user_from_model(author),
                    subscribed.contains(&model.author_id),
                ),
                tags: tags_by_recipe.remove(&model.id).unwrap_or_default(),
                ingredients: ingredients_by_recipe.remove(&model.id).unwrap_or_default(),
                is_favorited: favorited.contains(&model.id),
                is_in_shopping_cart: in_cart.contains(&model.id),
                name: model.name,
                image: model.image,
                text: model.text,
                cooking_time: model.cooking_time,
                created_at: model.created_at,
            });
        }
        Ok(views)
    }
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        Ok(model.map(recipe_from_model))
    }

    async fn find_view(
        &self,
        id: i32,
        viewer: Option<Uuid>,
    ) -> Result<Option<RecipeView>, RecipesServiceError> {
        let Some(model) = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe view")?
        else {
            return Ok(None);
        };
        Ok(self.assemble_views(vec![model], viewer).await?.pop())
    }

    async fn list_views(
        &self,
        filter: &RecipeFilter,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        let mut query = recipes::Entity::find();
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if !filter.tag_slugs.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                        .from(recipe_tags::Entity)
                        .inner_join(
                            tags::Entity,
                            Expr::col((tags::Entity, tags::Column::Id))
                                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                        )
                        .and_where(tags::Column::Slug.is_in(filter.tag_slugs.iter().cloned()))
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(favorites::Column::RecipeId)
                        .from(favorites::Entity)
                        .and_where(favorites::Column::UserId.eq(user_id))
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(shopping_carts::Column::RecipeId)
                        .from(shopping_carts::Entity)
                        .and_where(shopping_carts::Column::UserId.eq(user_id))
                        .to_owned(),
                ),
            );
        }
        let models = query
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .page(page)
            .all(&self.db)
            .await
            .context("list recipes")?;
        self.assemble_views(models, viewer).await
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<i32, RecipesServiceError> {
        let txn = self.db.begin().await.context("begin create recipe")?;
        let model = recipes::ActiveModel {
            author_id: Set(recipe.author_id),
            name: Set(recipe.name.clone()),
            image: Set(recipe.image.clone()),
            text: Set(recipe.text.clone()),
            cooking_time: Set(recipe.cooking_time),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| user_insert_error(e, "insert recipe"))?;
        replace_ingredients(&txn, model.id, &recipe.ingredients).await?;
        replace_tags(&txn, model.id, &recipe.tag_ids).await?;
        txn.commit().await.context("commit create recipe")?;
        Ok(model.id)
    }

    async fn update(&self, id: i32, patch: &RecipePatch) -> Result<(), RecipesServiceError> {
        let txn = self.db.begin().await.context("begin update recipe")?;
        let mut am = recipes::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        let mut changed = false;
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
            changed = true;
        }
        if let Some(image) = &patch.image {
            am.image = Set(image.clone());
            changed = true;
        }
        if let Some(text) = &patch.text {
            am.text = Set(text.clone());
            changed = true;
        }
        if let Some(cooking_time) = patch.cooking_time {
            am.cooking_time = Set(cooking_time);
            changed = true;
        }
        if changed {
            am.update(&txn).await.context("update recipe")?;
        }
        if let Some(items) = &patch.ingredients {
            replace_ingredients(&txn, id, items).await?;
        }
        if let Some(tag_ids) = &patch.tag_ids {
            replace_tags(&txn, id, tag_ids).await?;
        }
        txn.commit().await.context("commit update recipe")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }
}

impl RecipeSummaryPort for DbRecipeRepository {
    async fn find_summary(&self, id: i32) -> Result<Option<RecipeSummary>, RecipesServiceError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe summary")?;
        Ok(model.map(|m| RecipeSummary::from(recipe_from_model(m))))
    }
}

async fn replace_ingredients<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    items: &[IngredientAmount],
) -> Result<(), RecipesServiceError> {
    recipe_ingredients::Entity::delete_many()
        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await
        .context("clear recipe ingredients")?;
    if items.is_empty() {
        return Ok(());
    }
    let models = items.iter().map(|item| recipe_ingredients::ActiveModel {
        recipe_id: Set(recipe_id),
        ingredient_id: Set(item.ingredient_id),
        amount: Set(item.amount),
    });
    recipe_ingredients::Entity::insert_many(models)
        .exec_without_returning(conn)
        .await
        .context("insert recipe ingredients")?;
    Ok(())
}

async fn replace_tags<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    tag_ids: &[i32],
) -> Result<(), RecipesServiceError> {
    recipe_tags::Entity::delete_many()
        .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await
        .context("clear recipe tags")?;
    if tag_ids.is_empty() {
        return Ok(());
    }
    let models = tag_ids.iter().map(|tag_id| recipe_tags::ActiveModel {
        recipe_id: Set(recipe_id),
        tag_id: Set(*tag_id),
    });
    recipe_tags::Entity::insert_many(models)
        .exec_without_returning(conn)
        .await
        .context("insert recipe tags")?;
    Ok(())
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        author_id: model.author_id,
        name: model.name,
        image: model.image,
        text: model.text,
        cooking_time: model.cooking_time,
        created_at: model.created_at,
    }
}

// ── Shopping cart repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbShoppingCartRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct IngredientTotalRow {
    name: String,
    measurement_unit: String,
    amount: i64,
}

impl ShoppingCartRepository for DbShoppingCartRepository {
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let am = shopping_carts::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        };
        let inserted = shopping_carts::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([
                    shopping_carts::Column::UserId,
                    shopping_carts::Column::RecipeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| user_insert_error(e, "insert shopping cart entry"))?;
        Ok(inserted > 0)
    }

    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = shopping_carts::Entity::delete_by_id((user_id, recipe_id))
            .exec(&self.db)
            .await
            .context("delete shopping cart entry")?;
        Ok(result.rows_affected > 0)
    }

    async fn sum_ingredients(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingListLine>, RecipesServiceError> {
        // SELECT i.name, i.measurement_unit, SUM(ri.amount)
        //   FROM recipe_ingredients ri JOIN ingredients i ON i.id = ri.ingredient_id
        //  WHERE ri.recipe_id IN (SELECT recipe_id FROM shopping_carts WHERE user_id = $1)
        //  GROUP BY i.name, i.measurement_unit
        let rows = recipe_ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Name)
            .column(ingredients::Column::MeasurementUnit)
            .column_as(recipe_ingredients::Column::Amount.sum(), "amount")
            .join(
                JoinType::InnerJoin,
                recipe_ingredients::Relation::Ingredient.def(),
            )
            .filter(
                recipe_ingredients::Column::RecipeId.in_subquery(
                    Query::select()
                        .column(shopping_carts::Column::RecipeId)
                        .from(shopping_carts::Entity)
                        .and_where(shopping_carts::Column::UserId.eq(user_id))
                        .to_owned(),
                ),
            )
            .group_by(ingredients::Column::Name)
            .group_by(ingredients::Column::MeasurementUnit)
            .into_model::<IngredientTotalRow>()
            .all(&self.db)
            .await
            .context("sum shopping cart ingredients")?;
        Ok(rows
            .into_iter()
            .map(|r| ShoppingListLine::new(r.name, r.measurement_unit, r.amount))
            .collect())
    }
}

// ── Favorite repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavoriteRepository {
    pub db: DatabaseConnection,
}

impl FavoriteRepository for DbFavoriteRepository {
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let am = favorites::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        };
        let inserted = favorites::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| user_insert_error(e, "insert favorite"))?;
        Ok(inserted > 0)
    }

    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = favorites::Entity::delete_by_id((user_id, recipe_id))
            .exec(&self.db)
            .await
            .context("delete favorite")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl DbSubscriptionRepository {
    async fn subscribed_author(
        &self,
        author: users::Model,
        is_subscribed: bool,
        recipes_limit: Option<u64>,
    ) -> Result<SubscribedAuthor, RecipesServiceError> {
        let by_author = recipes::Entity::find().filter(recipes::Column::AuthorId.eq(author.id));
        let recipes_count = by_author
            .clone()
            .count(&self.db)
            .await
            .context("count author recipes")?;
        let recipes = by_author
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .limit(recipes_limit)
            .all(&self.db)
            .await
            .context("find author recipes")?
            .into_iter()
            .map(|m| RecipeSummary::from(recipe_from_model(m)))
            .collect();
        Ok(SubscribedAuthor {
            author: UserProfile::new(user_from_model(author), is_subscribed),
            recipes,
            recipes_count,
        })
    }
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, RecipesServiceError> {
        let am = subscriptions::ActiveModel {
            user_id: Set(user_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
        };
        let inserted = subscriptions::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([
                    subscriptions::Column::UserId,
                    subscriptions::Column::AuthorId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| user_insert_error(e, "insert subscription"))?;
        Ok(inserted > 0)
    }

    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let result = subscriptions::Entity::delete_by_id((user_id, author_id))
            .exec(&self.db)
            .await
            .context("delete subscription")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Vec<SubscribedAuthor>, RecipesServiceError> {
        let subscriptions = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .order_by_desc(subscriptions::Column::CreatedAt)
            .order_by_desc(subscriptions::Column::AuthorId)
            .page(page)
            .all(&self.db)
            .await
            .context("list subscriptions")?;
        let author_ids: Vec<Uuid> = subscriptions.iter().map(|s| s.author_id).collect();
        let mut authors: HashMap<Uuid, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find subscribed authors")?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut result = Vec::with_capacity(author_ids.len());
        for author_id in author_ids {
            if let Some(author) = authors.remove(&author_id) {
                result.push(self.subscribed_author(author, true, recipes_limit).await?);
            }
        }
        Ok(result)
    }

    async fn find_author(
        &self,
        user_id: Uuid,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<Option<SubscribedAuthor>, RecipesServiceError> {
        let Some(author) = users::Entity::find_by_id(author_id)
            .one(&self.db)
            .await
            .context("find author")?
        else {
            return Ok(None);
        };
        let is_subscribed = subscriptions::Entity::find_by_id((user_id, author_id))
            .one(&self.db)
            .await
            .context("find subscription")?
            .is_some();
        Ok(Some(
            self.subscribed_author(author, is_subscribed, recipes_limit)
                .await?,
        ))
    }
}
