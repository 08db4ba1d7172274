//! Domain types shared across Foodgram crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers as well as in `infra/` adapters
//! that need to speak the same vocabulary.

pub mod pagination;
pub mod shopping_list;
