//! Domain entities.

mod coin;

pub use coin::{now_millis, Coin, NewCoin};
