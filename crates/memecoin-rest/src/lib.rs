//! # Meme Coin REST
//!
//! REST API layer using Axum for the Meme Coin API.
//! Provides the `/api/v1/meme-coins` endpoints, health checks and
//! OpenAPI documentation.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
