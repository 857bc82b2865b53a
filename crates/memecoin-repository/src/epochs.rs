//! Per-coin write counters used to discard stale cache populates.
//!
//! A populate records the epoch of its coin before reading the store. Every
//! successful store write advances the epoch before its invalidation is
//! spawned. A populate that finds the epoch moved has read a snapshot that
//! a later write superseded, so it must not leave that snapshot cached.

use memecoin_core::CoinId;
use std::sync::atomic::{AtomicU64, Ordering};

const STRIPES: usize = 256;

/// Striped write epochs.
///
/// Ids share a stripe modulo its count, so memory stays fixed. A shared
/// stripe only costs an extra eviction, never a stale entry.
#[derive(Debug)]
pub struct WriteEpochs {
    stripes: Box<[AtomicU64]>,
}

impl WriteEpochs {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stripes: (0..STRIPES).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    fn stripe(&self, id: CoinId) -> &AtomicU64 {
        let len = i64::try_from(self.stripes.len()).unwrap_or(i64::MAX);
        let index = usize::try_from(id.into_inner().rem_euclid(len)).unwrap_or(0);
        &self.stripes[index]
    }

    /// Current epoch for `id`.
    #[must_use]
    pub fn current(&self, id: CoinId) -> u64 {
        self.stripe(id).load(Ordering::Acquire)
    }

    /// Records a completed store write for `id`.
    pub fn advance(&self, id: CoinId) {
        self.stripe(id).fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for WriteEpochs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_only_its_stripe() {
        let epochs = WriteEpochs::new();
        let before = epochs.current(CoinId::new(1));

        epochs.advance(CoinId::new(1));

        assert_eq!(epochs.current(CoinId::new(1)), before + 1);
        assert_eq!(epochs.current(CoinId::new(2)), 0);
    }

    #[test]
    fn test_ids_wrap_onto_shared_stripes() {
        let epochs = WriteEpochs::new();
        epochs.advance(CoinId::new(3));

        assert_eq!(epochs.current(CoinId::new(3 + 256)), 1);
        assert_eq!(epochs.current(CoinId::new(-1)), 0);
    }
}
