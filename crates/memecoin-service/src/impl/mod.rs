//! Coin service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `coin_service.rs`).

pub mod coin_service_impl;

pub use coin_service_impl::{CoinServiceImpl, CoinServiceImplParameters};
