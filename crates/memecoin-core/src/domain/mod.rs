//! # Meme Coin Domain
//!
//! Domain entities for the Meme Coin API.

pub mod entities;

pub use entities::*;
