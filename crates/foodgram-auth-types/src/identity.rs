//! Gateway-injected identity headers extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::HeaderMap;
use http::request::Parts;
use uuid::Uuid;

use foodgram_core::error::AppError;

pub const USER_ID_HEADER: &str = "x-foodgram-user-id";
pub const USER_ROLE_HEADER: &str = "x-foodgram-user-role";

pub const ROLE_USER: u8 = 0;
pub const ROLE_ADMIN: u8 = 1;

/// User identity injected by the gateway via `x-foodgram-user-id` and
/// `x-foodgram-user-role` headers.
///
/// As a required extractor it rejects with 401 when either header is absent
/// or malformed. As `Option<IdentityHeaders>` it yields `None` for anonymous
/// callers (no user-id header) and still rejects malformed headers.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl IdentityHeaders {
    pub fn is_admin(&self) -> bool {
        self.user_role >= ROLE_ADMIN
    }

    fn parse(headers: &HeaderMap) -> Result<Option<Self>, AppError> {
        let Some(raw_id) = headers.get(USER_ID_HEADER) else {
            return Ok(None);
        };
        let user_id = raw_id
            .to_str()
            .ok()
            .and_then(|s| s.parse::<Uuid>().ok())
            .ok_or(AppError::Unauthorized)?;
        let user_role = headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u8>().ok())
            .ok_or(AppError::Unauthorized)?;
        Ok(Some(Self { user_id, user_role }))
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // Parse synchronously so the returned future borrows nothing from `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = Self::parse(&parts.headers);
        async move { identity?.ok_or(AppError::Unauthorized) }
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let identity = Self::parse(&parts.headers);
        async move { identity }
    }
}
