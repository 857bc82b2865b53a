//! REST API controllers.

pub mod coin_controller;
pub mod health_controller;

pub use health_controller::*;
