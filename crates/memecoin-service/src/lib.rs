//! # Meme Coin Service
//!
//! Application service layer for the Meme Coin API.
//! Translates repository results into DTOs and enforces request validation.

pub mod coin_service;
pub mod dto;
pub mod r#impl;
pub mod mappers;

pub use coin_service::*;
pub use dto::*;
pub use r#impl::{CoinServiceImpl, CoinServiceImplParameters};
