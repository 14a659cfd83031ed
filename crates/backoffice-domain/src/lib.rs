//! Domain types shared across the back-office crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; `infra/` converts to and from them.

pub mod id;
pub mod listing;
pub mod order;
