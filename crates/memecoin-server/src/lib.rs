//! # Meme Coin Server Library
//!
//! Dependency injection wiring, logging setup and startup utilities for
//! the Meme Coin API server.

pub mod di;
pub mod logging;
pub mod startup;
