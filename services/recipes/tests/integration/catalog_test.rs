use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::domain::types::{NewIngredient, NewTag, NewUser};
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::ingredient::{
    GetIngredientUseCase, ImportIngredientsUseCase, ListIngredientsUseCase,
};
use foodgram_recipes::usecase::tag::{CreateTagUseCase, GetTagUseCase};
use foodgram_recipes::usecase::user::{CreateUserUseCase, GetMeUseCase, ListUsersUseCase};

use crate::helpers::{MockIngredientRepo, MockTagRepo, MockUserRepo, ingredient, test_user};

// ── Ingredients ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_filter_ingredients_by_case_insensitive_prefix() {
    let uc = ListIngredientsUseCase {
        ingredients: MockIngredientRepo::new(vec![
            ingredient(1, "Sugar", "g"),
            ingredient(2, "sugar syrup", "ml"),
            ingredient(3, "Salt", "g"),
        ]),
    };

    let items = uc.execute(Some("SUG")).await.unwrap();
    let ids: Vec<_> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, [1, 2]);
}

#[tokio::test]
async fn should_treat_blank_prefix_as_no_filter() {
    let uc = ListIngredientsUseCase {
        ingredients: MockIngredientRepo::new(vec![
            ingredient(1, "Sugar", "g"),
            ingredient(2, "Salt", "g"),
        ]),
    };
    assert_eq!(uc.execute(Some("  ")).await.unwrap().len(), 2);
}

#[tokio::test]
async fn should_return_ingredient_not_found() {
    let uc = GetIngredientUseCase {
        ingredients: MockIngredientRepo::default(),
    };
    let result = uc.execute(1).await;
    assert!(matches!(result, Err(RecipesServiceError::IngredientNotFound)));
}

#[tokio::test]
async fn should_import_trimmed_ingredients() {
    let repo = MockIngredientRepo::default();
    let imported = repo.imported.clone();
    let uc = ImportIngredientsUseCase { ingredients: repo };

    let count = uc
        .execute(vec![
            NewIngredient {
                name: " Flour ".to_owned(),
                measurement_unit: "g".to_owned(),
            },
            NewIngredient {
                name: "Egg".to_owned(),
                measurement_unit: "pcs".to_owned(),
            },
        ])
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(imported.lock().unwrap()[0].name, "Flour");
}

#[tokio::test]
async fn should_reject_import_with_blank_unit() {
    let uc = ImportIngredientsUseCase {
        ingredients: MockIngredientRepo::default(),
    };
    let result = uc
        .execute(vec![NewIngredient {
            name: "Salt".to_owned(),
            measurement_unit: " ".to_owned(),
        }])
        .await;
    assert!(matches!(result, Err(RecipesServiceError::MissingData)));
}

// ── Tags ─────────────────────────────────────────────────────────────────────

fn breakfast() -> NewTag {
    NewTag {
        name: "Breakfast".to_owned(),
        color: "#E26C2D".to_owned(),
        slug: "breakfast".to_owned(),
    }
}

#[tokio::test]
async fn should_create_tag_and_reject_duplicate() {
    let uc = CreateTagUseCase {
        tags: MockTagRepo::default(),
    };

    let tag = uc.execute(breakfast()).await.unwrap();
    assert_eq!(tag.slug, "breakfast");

    let result = uc.execute(breakfast()).await;
    assert!(matches!(result, Err(RecipesServiceError::TagAlreadyExists)));
}

#[tokio::test]
async fn should_reject_invalid_tag_color() {
    let uc = CreateTagUseCase {
        tags: MockTagRepo::default(),
    };
    let result = uc
        .execute(NewTag {
            color: "orange".to_owned(),
            ..breakfast()
        })
        .await;
    assert!(matches!(result, Err(RecipesServiceError::InvalidTagColor)));
    assert!(uc.tags.tags.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_tag_not_found() {
    let uc = GetTagUseCase {
        tags: MockTagRepo::default(),
    };
    assert!(matches!(
        uc.execute(3).await,
        Err(RecipesServiceError::TagNotFound)
    ));
}

// ── Users ────────────────────────────────────────────────────────────────────

fn new_user(id: Uuid, username: &str) -> NewUser {
    NewUser {
        id,
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        first_name: "Julia".to_owned(),
        last_name: "Child".to_owned(),
    }
}

#[tokio::test]
async fn should_create_profile_for_gateway_identity() {
    let id = Uuid::now_v7();
    let uc = CreateUserUseCase {
        users: MockUserRepo::default(),
    };

    let profile = uc.execute(new_user(id, "julia")).await.unwrap();
    assert_eq!(profile.id, id);
    assert!(!profile.is_subscribed);

    let again = uc.execute(new_user(id, "julia2")).await;
    assert!(matches!(again, Err(RecipesServiceError::UserAlreadyExists)));
}

#[tokio::test]
async fn should_reject_invalid_username() {
    let uc = CreateUserUseCase {
        users: MockUserRepo::default(),
    };
    let result = uc.execute(new_user(Uuid::now_v7(), "julia child")).await;
    assert!(matches!(result, Err(RecipesServiceError::InvalidUsername)));
}

#[tokio::test]
async fn should_return_user_not_found_for_unregistered_me() {
    let uc = GetMeUseCase {
        users: MockUserRepo::default(),
    };
    let result = uc.execute(Uuid::now_v7()).await;
    assert!(matches!(result, Err(RecipesServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_page_user_list() {
    let users = (0..8).map(|i| test_user(&format!("cook{i}"))).collect();
    let uc = ListUsersUseCase {
        users: MockUserRepo::new(users),
    };

    let second_page = uc
        .execute(None, PageRequest::from_query(Some(6), Some(2)))
        .await
        .unwrap();
    assert_eq!(second_page.len(), 2);
    assert_eq!(second_page[0].username, "cook6");
}
