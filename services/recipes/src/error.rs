use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use foodgram_core::error::error_response;

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("recipe is not in shopping cart")]
    ShoppingCartEntryNotFound,
    #[error("recipe is not in favorites")]
    FavoriteNotFound,
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("recipe already in shopping cart")]
    AlreadyInShoppingCart,
    #[error("recipe already in favorites")]
    AlreadyFavorited,
    #[error("already subscribed to this author")]
    AlreadySubscribed,
    #[error("cannot subscribe to yourself")]
    SelfSubscription,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("tag already exists")]
    TagAlreadyExists,
    #[error("cooking time must be at least 1 minute")]
    InvalidCookingTime,
    #[error("ingredient amount must be at least 1")]
    InvalidAmount,
    #[error("recipe needs at least one ingredient")]
    MissingIngredients,
    #[error("ingredient listed more than once")]
    DuplicateIngredient,
    #[error("tag listed more than once")]
    DuplicateTag,
    #[error("invalid recipe name")]
    InvalidRecipeName,
    #[error("recipe image is required")]
    MissingImage,
    #[error("recipe text is too long")]
    RecipeTextTooLong,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid first or last name")]
    InvalidPersonName,
    #[error("invalid tag color")]
    InvalidTagColor,
    #[error("invalid tag slug")]
    InvalidTagSlug,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::ShoppingCartEntryNotFound => "SHOPPING_CART_ENTRY_NOT_FOUND",
            Self::FavoriteNotFound => "FAVORITE_NOT_FOUND",
            Self::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            Self::AlreadyInShoppingCart => "ALREADY_IN_SHOPPING_CART",
            Self::AlreadyFavorited => "ALREADY_FAVORITED",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::InvalidCookingTime => "INVALID_COOKING_TIME",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::MissingIngredients => "MISSING_INGREDIENTS",
            Self::DuplicateIngredient => "DUPLICATE_INGREDIENT",
            Self::DuplicateTag => "DUPLICATE_TAG",
            Self::InvalidRecipeName => "INVALID_RECIPE_NAME",
            Self::MissingImage => "MISSING_IMAGE",
            Self::RecipeTextTooLong => "RECIPE_TEXT_TOO_LONG",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPersonName => "INVALID_PERSON_NAME",
            Self::InvalidTagColor => "INVALID_TAG_COLOR",
            Self::InvalidTagSlug => "INVALID_TAG_SLUG",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::IngredientNotFound
            | Self::TagNotFound
            | Self::ShoppingCartEntryNotFound
            | Self::FavoriteNotFound
            | Self::SubscriptionNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::TagAlreadyExists => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Duplicate joins are reported as validation failures.
            Self::AlreadyInShoppingCart
            | Self::AlreadyFavorited
            | Self::AlreadySubscribed
            | Self::SelfSubscription
            | Self::InvalidCookingTime
            | Self::InvalidAmount
            | Self::MissingIngredients
            | Self::DuplicateIngredient
            | Self::DuplicateTag
            | Self::InvalidRecipeName
            | Self::MissingImage
            | Self::RecipeTextTooLong
            | Self::InvalidUsername
            | Self::InvalidEmail
            | Self::InvalidPersonName
            | Self::InvalidTagColor
            | Self::InvalidTagSlug
            | Self::MissingData => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), &self.to_string())
    }
}
