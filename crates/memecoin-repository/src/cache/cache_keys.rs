//! Cache key generators for consistent key naming.

use memecoin_core::CoinId;

/// Cache key for a coin snapshot.
#[must_use]
pub fn coin_by_id(id: CoinId) -> String {
    format!("coin:{id}")
}
