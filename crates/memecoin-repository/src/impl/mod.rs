//! Repository layer implementations.
//!
//! Trait definitions live in the parent module (`traits.rs`).
//! This module contains concrete structs that implement those traits.

pub mod cached_coin_repository;

pub use cached_coin_repository::{CachedCoinRepository, CachedCoinRepositoryParameters};
