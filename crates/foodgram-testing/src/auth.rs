//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive `x-foodgram-user-id` and
//! `x-foodgram-user-role` headers injected by the gateway. In tests,
//! `MockAuth` produces these headers directly so no gateway is needed.

use http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use foodgram_auth_types::identity::{ROLE_ADMIN, ROLE_USER, USER_ID_HEADER, USER_ROLE_HEADER};

/// Configurable identity injected into test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: u8) -> Self {
        Self { user_id, user_role }
    }

    /// A fresh regular user.
    pub fn user() -> Self {
        Self::new(Uuid::now_v7(), ROLE_USER)
    }

    /// A fresh administrator.
    pub fn admin() -> Self {
        Self::new(Uuid::now_v7(), ROLE_ADMIN)
    }

    /// Header pairs, for clients that add headers one at a time.
    pub fn header_pairs(&self) -> [(HeaderName, HeaderValue); 2] {
        [
            (
                HeaderName::from_static(USER_ID_HEADER),
                HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
            ),
            (
                HeaderName::from_static(USER_ROLE_HEADER),
                HeaderValue::from(u16::from(self.user_role)),
            ),
        ]
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        self.header_pairs().into_iter().collect()
    }
}
