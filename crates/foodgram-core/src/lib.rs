//! Ambient plumbing shared by Foodgram services: configuration, tracing,
//! HTTP middleware, the common JSON error body and sea-orm helpers.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
