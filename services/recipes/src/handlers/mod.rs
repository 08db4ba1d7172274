pub mod favorite;
pub mod health;
pub mod ingredient;
pub mod recipe;
pub mod shopping_cart;
pub mod subscription;
pub mod tag;
pub mod user;

use serde::de::DeserializeOwned;

use crate::error::RecipesServiceError;

/// Parse a raw query string with `serde_qs` so bracketed arrays (`tags[]=a`)
/// deserialize into `Vec`s. An absent query yields `T::default()`.
pub(crate) fn parse_query<T>(raw_query: Option<&str>) -> Result<T, RecipesServiceError>
where
    T: DeserializeOwned + Default,
{
    raw_query
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| RecipesServiceError::MissingData)
        .map(Option::unwrap_or_default)
}

/// `1`/`true` and `0`/`false`, as sent by the web client.
pub(crate) fn parse_flag(raw: Option<&str>) -> Result<Option<bool>, RecipesServiceError> {
    match raw {
        None => Ok(None),
        Some("1" | "true") => Ok(Some(true)),
        Some("0" | "false") => Ok(Some(false)),
        Some(_) => Err(RecipesServiceError::MissingData),
    }
}
