//! Result type aliases for the Meme Coin API.

use crate::MemeCoinError;

/// A specialized `Result` type for Meme Coin operations.
pub type MemeCoinResult<T> = Result<T, MemeCoinError>;
