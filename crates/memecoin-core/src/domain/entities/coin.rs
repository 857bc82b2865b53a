//! Coin entity.

use crate::CoinId;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Returns the current instant truncated to millisecond precision.
///
/// Coins are persisted with epoch-millisecond timestamps, so every
/// timestamp the domain produces is truncated the same way. A cached copy
/// then compares equal to a freshly loaded one.
#[must_use]
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A meme coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Store-assigned identifier.
    pub id: CoinId,

    /// Unique coin name.
    pub name: String,

    /// Free-form description, possibly empty.
    pub description: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,

    /// Number of pokes received.
    pub popularity_score: u32,
}

impl Coin {
    /// Replaces the description and refreshes `updated_at`.
    pub fn update_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    /// Refreshes `updated_at`, never moving it before `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.created_at);
    }

    /// Timestamp helpers for epoch-millisecond storage.
    #[must_use]
    pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(millis)
    }
}

/// Input for creating a coin. The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCoin {
    /// Unique coin name.
    pub name: String,

    /// Optional description; empty when not supplied.
    pub description: String,
}

impl NewCoin {
    /// Creates a new coin input.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Materializes the coin the store will hold once it assigns `id`.
    #[must_use]
    pub fn into_coin(self, id: CoinId, now: DateTime<Utc>) -> Coin {
        Coin {
            id,
            name: self.name,
            description: self.description,
            created_at: now,
            updated_at: now,
            popularity_score: 0,
        }
    }
}
