//! Data Transfer Objects (DTOs).

mod coin_dto;

pub use coin_dto::*;
