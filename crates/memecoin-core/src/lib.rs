//! # Meme Coin Core
//!
//! Core types, traits, and error definitions for the Meme Coin API.
//! Every other crate in the workspace builds on the abstractions here:
//! the [`Coin`] entity, the typed [`CoinId`], and the unified
//! [`MemeCoinError`].

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
