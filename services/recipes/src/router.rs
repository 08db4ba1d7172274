use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use foodgram_core::error::route_not_found;
use foodgram_core::health::healthz;
use foodgram_core::middleware::with_http_layers;

use crate::handlers::{
    favorite::{add_favorite, remove_favorite},
    health::readyz,
    ingredient::{get_ingredient, get_ingredients},
    recipe::{create_recipe, delete_recipe, get_recipe, get_recipes, update_recipe},
    shopping_cart::{add_to_shopping_cart, download_shopping_cart, remove_from_shopping_cart},
    subscription::{get_subscriptions, subscribe, unsubscribe},
    tag::{create_tag, get_tag, get_tags},
    user::{create_user, get_me, get_user, get_users},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", get(get_users))
        .route("/users", post(create_user))
        .route("/users/me", get(get_me))
        .route("/users/{id}", get(get_user))
        // Subscriptions
        .route("/users/subscriptions", get(get_subscriptions))
        .route("/users/{id}/subscribe", post(subscribe))
        .route("/users/{id}/subscribe", delete(unsubscribe))
        // Tags
        .route("/tags", get(get_tags))
        .route("/tags", post(create_tag))
        .route("/tags/{id}", get(get_tag))
        // Ingredients
        .route("/ingredients", get(get_ingredients))
        .route("/ingredients/{id}", get(get_ingredient))
        // Recipes
        .route("/recipes", get(get_recipes))
        .route("/recipes", post(create_recipe))
        .route("/recipes/{id}", get(get_recipe))
        .route("/recipes/{id}", patch(update_recipe))
        .route("/recipes/{id}", delete(delete_recipe))
        // Favorites
        .route("/recipes/{id}/favorite", post(add_favorite))
        .route("/recipes/{id}/favorite", delete(remove_favorite))
        // Shopping cart
        .route("/recipes/{id}/shopping_cart", post(add_to_shopping_cart))
        .route(
            "/recipes/{id}/shopping_cart",
            delete(remove_from_shopping_cart),
        )
        .route("/recipes/{id}/shopping_cart/", post(add_to_shopping_cart))
        .route(
            "/recipes/{id}/shopping_cart/",
            delete(remove_from_shopping_cart),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(download_shopping_cart),
        )
        .route(
            "/recipes/download_shopping_cart/",
            get(download_shopping_cart),
        )
        .fallback(route_not_found)
        .with_state(state);
    with_http_layers(router)
}
