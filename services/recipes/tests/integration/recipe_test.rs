use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::domain::types::{IngredientAmount, NewRecipe, RecipeFilter, RecipePatch};
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesInput,
    ListRecipesUseCase, UpdateRecipeUseCase,
};

use crate::helpers::{
    MockIngredientRepo, MockRecipeRepo, MockTagRepo, ingredient, tag, test_recipe,
};

fn catalog() -> MockIngredientRepo {
    MockIngredientRepo::new(vec![
        ingredient(1, "Flour", "g"),
        ingredient(2, "Egg", "pcs"),
    ])
}

fn tags() -> MockTagRepo {
    MockTagRepo::new(vec![tag(1, "breakfast"), tag(2, "dinner")])
}

fn new_recipe(author_id: Uuid) -> NewRecipe {
    NewRecipe {
        author_id,
        name: "Pancakes".to_owned(),
        image: "recipes/images/pancakes.png".to_owned(),
        text: "Whisk, rest, fry.".to_owned(),
        cooking_time: 25,
        ingredients: vec![
            IngredientAmount {
                ingredient_id: 1,
                amount: 200,
            },
            IngredientAmount {
                ingredient_id: 2,
                amount: 2,
            },
        ],
        tag_ids: vec![1],
    }
}

// ── CreateRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_recipe_and_return_view() {
    let author_id = Uuid::now_v7();
    let uc = CreateRecipeUseCase {
        recipes: MockRecipeRepo::default(),
        ingredients: catalog(),
        tags: tags(),
    };

    let view = uc.execute(new_recipe(author_id)).await.unwrap();
    assert_eq!(view.name, "Pancakes");
    assert_eq!(view.author.id, author_id);
    assert_eq!(uc.recipes.created.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_zero_cooking_time_before_writing() {
    let mut input = new_recipe(Uuid::now_v7());
    input.cooking_time = 0;
    let uc = CreateRecipeUseCase {
        recipes: MockRecipeRepo::default(),
        ingredients: catalog(),
        tags: tags(),
    };

    let result = uc.execute(input).await;
    assert!(matches!(result, Err(RecipesServiceError::InvalidCookingTime)));
    assert!(uc.recipes.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_unknown_ingredient() {
    let mut input = new_recipe(Uuid::now_v7());
    input.ingredients.push(IngredientAmount {
        ingredient_id: 99,
        amount: 1,
    });
    let uc = CreateRecipeUseCase {
        recipes: MockRecipeRepo::default(),
        ingredients: catalog(),
        tags: tags(),
    };

    let result = uc.execute(input).await;
    assert!(matches!(result, Err(RecipesServiceError::IngredientNotFound)));
}

#[tokio::test]
async fn should_reject_unknown_tag() {
    let mut input = new_recipe(Uuid::now_v7());
    input.tag_ids = vec![1, 7];
    let uc = CreateRecipeUseCase {
        recipes: MockRecipeRepo::default(),
        ingredients: catalog(),
        tags: tags(),
    };

    let result = uc.execute(input).await;
    assert!(matches!(result, Err(RecipesServiceError::TagNotFound)));
}

#[tokio::test]
async fn should_reject_duplicate_ingredient_ids() {
    let mut input = new_recipe(Uuid::now_v7());
    input.ingredients[1].ingredient_id = 1;
    let uc = CreateRecipeUseCase {
        recipes: MockRecipeRepo::default(),
        ingredients: catalog(),
        tags: tags(),
    };

    let result = uc.execute(input).await;
    assert!(matches!(
        result,
        Err(RecipesServiceError::DuplicateIngredient)
    ));
}

// ── GetRecipeUseCase / ListRecipesUseCase ────────────────────────────────────

#[tokio::test]
async fn should_return_recipe_not_found_for_missing_id() {
    let uc = GetRecipeUseCase {
        recipes: MockRecipeRepo::default(),
    };
    let result = uc.execute(None, 5).await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

#[tokio::test]
async fn should_return_empty_page_for_anonymous_favorites_filter() {
    let uc = ListRecipesUseCase {
        recipes: MockRecipeRepo::new(vec![test_recipe(1, Uuid::now_v7())]),
    };
    let input = ListRecipesInput {
        is_favorited: Some(true),
        ..Default::default()
    };

    let views = uc.execute(None, input, PageRequest::default()).await.unwrap();
    assert!(views.is_empty());
    assert!(uc.recipes.last_filter.lock().unwrap().is_none());
}

#[tokio::test]
async fn should_resolve_cart_filter_against_viewer() {
    let viewer = Uuid::now_v7();
    let uc = ListRecipesUseCase {
        recipes: MockRecipeRepo::default(),
    };
    let input = ListRecipesInput {
        tag_slugs: vec!["breakfast".to_owned()],
        is_in_shopping_cart: Some(true),
        is_favorited: Some(false),
        ..Default::default()
    };

    uc.execute(Some(viewer), input, PageRequest::default())
        .await
        .unwrap();
    let filter = uc.recipes.last_filter.lock().unwrap().clone().unwrap();
    assert_eq!(
        filter,
        RecipeFilter {
            author_id: None,
            tag_slugs: vec!["breakfast".to_owned()],
            favorited_by: None,
            in_cart_of: Some(viewer),
        }
    );
}

// ── UpdateRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_update_by_non_author() {
    let author_id = Uuid::now_v7();
    let uc = UpdateRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![test_recipe(1, author_id)]),
        ingredients: catalog(),
        tags: tags(),
    };
    let patch = RecipePatch {
        name: Some("Stolen".to_owned()),
        ..Default::default()
    };

    let result = uc.execute(Uuid::now_v7(), false, 1, patch).await;
    assert!(matches!(result, Err(RecipesServiceError::Forbidden)));
    assert!(uc.recipes.updated.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_allow_admin_to_update_any_recipe() {
    let uc = UpdateRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![test_recipe(1, Uuid::now_v7())]),
        ingredients: catalog(),
        tags: tags(),
    };
    let patch = RecipePatch {
        cooking_time: Some(40),
        ..Default::default()
    };

    let view = uc.execute(Uuid::now_v7(), true, 1, patch).await.unwrap();
    assert_eq!(view.cooking_time, 40);
}

#[tokio::test]
async fn should_reject_empty_patch() {
    let author_id = Uuid::now_v7();
    let uc = UpdateRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![test_recipe(1, author_id)]),
        ingredients: catalog(),
        tags: tags(),
    };

    let result = uc
        .execute(author_id, false, 1, RecipePatch::default())
        .await;
    assert!(matches!(result, Err(RecipesServiceError::MissingData)));
}

#[tokio::test]
async fn should_validate_replacement_ingredients_on_update() {
    let author_id = Uuid::now_v7();
    let uc = UpdateRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![test_recipe(1, author_id)]),
        ingredients: catalog(),
        tags: tags(),
    };
    let patch = RecipePatch {
        ingredients: Some(vec![IngredientAmount {
            ingredient_id: 1,
            amount: 0,
        }]),
        ..Default::default()
    };

    let result = uc.execute(author_id, false, 1, patch).await;
    assert!(matches!(result, Err(RecipesServiceError::InvalidAmount)));
}

// ── DeleteRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_own_recipe_and_forbid_others() {
    let author_id = Uuid::now_v7();
    let uc = DeleteRecipeUseCase {
        recipes: MockRecipeRepo::new(vec![test_recipe(1, author_id)]),
    };

    let forbidden = uc.execute(Uuid::now_v7(), false, 1).await;
    assert!(matches!(forbidden, Err(RecipesServiceError::Forbidden)));

    assert!(uc.execute(author_id, false, 1).await.is_ok());
    let missing = uc.execute(author_id, false, 1).await;
    assert!(matches!(missing, Err(RecipesServiceError::RecipeNotFound)));
}
