use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::favorite::{AddFavoriteUseCase, RemoveFavoriteUseCase};
use foodgram_recipes::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

use crate::helpers::{
    MockFavoriteRepo, MockRecipeRepo, MockSubscriptionRepo, MockUserRepo, test_recipe, test_user,
};

// ── Favorites ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_favorite_recipe_once() {
    let user_id = Uuid::now_v7();
    let uc = AddFavoriteUseCase {
        recipes: MockRecipeRepo::new(vec![test_recipe(1, Uuid::now_v7())]),
        favorites: MockFavoriteRepo::default(),
    };

    let summary = uc.execute(user_id, 1).await.unwrap();
    assert_eq!(summary.id, 1);
    assert_eq!(summary.name, "Recipe 1");

    let second = uc.execute(user_id, 1).await;
    assert!(
        matches!(second, Err(RecipesServiceError::AlreadyFavorited)),
        "expected AlreadyFavorited, got {second:?}"
    );
    assert_eq!(uc.favorites.entries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_return_recipe_not_found_when_favoriting_missing_recipe() {
    let uc = AddFavoriteUseCase {
        recipes: MockRecipeRepo::default(),
        favorites: MockFavoriteRepo::default(),
    };
    let result = uc.execute(Uuid::now_v7(), 42).await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

#[tokio::test]
async fn should_remove_favorite_then_report_missing() {
    let user_id = Uuid::now_v7();
    let favorites = MockFavoriteRepo::default();
    favorites.entries.lock().unwrap().insert((user_id, 1));
    let uc = RemoveFavoriteUseCase {
        recipes: MockRecipeRepo::new(vec![test_recipe(1, Uuid::now_v7())]),
        favorites,
    };

    assert!(uc.execute(user_id, 1).await.is_ok());
    let result = uc.execute(user_id, 1).await;
    assert!(matches!(result, Err(RecipesServiceError::FavoriteNotFound)));
}

#[tokio::test]
async fn should_not_remove_other_users_favorite() {
    let owner = Uuid::now_v7();
    let favorites = MockFavoriteRepo::default();
    favorites.entries.lock().unwrap().insert((owner, 1));
    let uc = RemoveFavoriteUseCase {
        recipes: MockRecipeRepo::new(vec![test_recipe(1, owner)]),
        favorites,
    };

    let result = uc.execute(Uuid::now_v7(), 1).await;
    assert!(matches!(result, Err(RecipesServiceError::FavoriteNotFound)));
    assert_eq!(uc.favorites.entries.lock().unwrap().len(), 1);
}

// ── Subscriptions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_self_subscription() {
    let me = test_user("me");
    let uc = SubscribeUseCase {
        users: MockUserRepo::new(vec![me.clone()]),
        subscriptions: MockSubscriptionRepo::new(vec![me.clone()]),
    };
    let result = uc.execute(me.id, me.id, None).await;
    assert!(matches!(result, Err(RecipesServiceError::SelfSubscription)));
    assert!(uc.subscriptions.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_author() {
    let uc = SubscribeUseCase {
        users: MockUserRepo::default(),
        subscriptions: MockSubscriptionRepo::default(),
    };
    let result = uc.execute(Uuid::now_v7(), Uuid::now_v7(), None).await;
    assert!(matches!(result, Err(RecipesServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_subscribe_once_and_mark_author_subscribed() {
    let follower = Uuid::now_v7();
    let author = test_user("chef");
    let uc = SubscribeUseCase {
        users: MockUserRepo::new(vec![author.clone()]),
        subscriptions: MockSubscriptionRepo::new(vec![author.clone()]),
    };

    let subscribed = uc.execute(follower, author.id, Some(3)).await.unwrap();
    assert_eq!(subscribed.author.id, author.id);
    assert!(subscribed.author.is_subscribed);

    let again = uc.execute(follower, author.id, None).await;
    assert!(matches!(again, Err(RecipesServiceError::AlreadySubscribed)));
}

#[tokio::test]
async fn should_unsubscribe_then_report_missing() {
    let follower = Uuid::now_v7();
    let author = test_user("chef");
    let subscriptions = MockSubscriptionRepo::new(vec![author.clone()]);
    subscriptions
        .entries
        .lock()
        .unwrap()
        .push((follower, author.id));
    let uc = UnsubscribeUseCase { subscriptions };

    assert!(uc.execute(follower, author.id).await.is_ok());
    let result = uc.execute(follower, author.id).await;
    assert!(matches!(
        result,
        Err(RecipesServiceError::SubscriptionNotFound)
    ));
}

#[tokio::test]
async fn should_list_followed_authors_newest_first() {
    let follower = Uuid::now_v7();
    let first = test_user("first");
    let second = test_user("second");
    let subscriptions = MockSubscriptionRepo::new(vec![first.clone(), second.clone()]);
    {
        let mut entries = subscriptions.entries.lock().unwrap();
        entries.push((follower, first.id));
        entries.push((follower, second.id));
        entries.push((Uuid::now_v7(), first.id));
    }
    let uc = ListSubscriptionsUseCase { subscriptions };

    let authors = uc
        .execute(follower, PageRequest::default(), None)
        .await
        .unwrap();
    let names: Vec<_> = authors.iter().map(|a| a.author.username.as_str()).collect();
    assert_eq!(names, ["second", "first"]);
}
