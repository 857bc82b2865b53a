//! MySQL coin DAO implementation.

use crate::{dao::CoinDao, DatabasePoolInterface};
use async_trait::async_trait;
use memecoin_core::{now_millis, Coin, CoinId, MemeCoinError, MemeCoinResult, NewCoin};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const RESOURCE: &str = "coin";

/// MySQL coin DAO.
#[derive(Component, Clone)]
#[shaku(interface = CoinDao)]
pub struct MySqlCoinDao {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCoinDao {
    /// Creates a new MySQL coin DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a coin.
#[derive(Debug, FromRow)]
struct CoinRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: i64, // epoch millis
    updated_at: i64, // epoch millis
    popularity_score: u32,
}

impl TryFrom<CoinRow> for Coin {
    type Error = MemeCoinError;

    fn try_from(row: CoinRow) -> Result<Self, Self::Error> {
        let timestamp = |millis: i64| {
            Coin::millis_to_datetime(millis).ok_or_else(|| {
                MemeCoinError::Internal(format!("Invalid timestamp in database: {millis}"))
            })
        };

        Ok(Coin {
            id: CoinId::new(row.id),
            name: row.name,
            description: row.description.unwrap_or_default(),
            created_at: timestamp(row.created_at)?,
            updated_at: timestamp(row.updated_at)?,
            popularity_score: row.popularity_score,
        })
    }
}

/// Empty descriptions are stored as NULL.
fn nullable(description: &str) -> Option<&str> {
    (!description.is_empty()).then_some(description)
}

fn insert_error(err: sqlx::Error, name: &str) -> MemeCoinError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            MemeCoinError::duplicate_name(name)
        }
        _ => err.into(),
    }
}

#[async_trait]
impl CoinDao for MySqlCoinDao {
    async fn insert(&self, new_coin: &NewCoin) -> MemeCoinResult<Coin> {
        debug!("Inserting coin: {}", new_coin.name);

        let now = now_millis();
        let result = sqlx::query(
            r"
            INSERT INTO coins (name, description, created_at, updated_at, popularity_score)
            VALUES (?, ?, ?, ?, 0)
            ",
        )
        .bind(&new_coin.name)
        .bind(nullable(&new_coin.description))
        .bind(now.timestamp_millis())
        .bind(now.timestamp_millis())
        .execute(self.pool.inner())
        .await
        .map_err(|e| insert_error(e, &new_coin.name))?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| MemeCoinError::Internal("Inserted id out of range".to_string()))?;

        Ok(new_coin.clone().into_coin(CoinId::new(id), now))
    }

    async fn update_by_id(&self, coin: &Coin) -> MemeCoinResult<()> {
        debug!("Updating coin: {}", coin.id);

        let result = sqlx::query(
            r"
            UPDATE coins
            SET description = ?, updated_at = GREATEST(created_at, ?)
            WHERE id = ?
            ",
        )
        .bind(nullable(&coin.description))
        .bind(now_millis().timestamp_millis())
        .bind(coin.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        // sqlx connects with CLIENT_FOUND_ROWS, so an unchanged match still counts.
        if result.rows_affected() == 0 {
            return Err(MemeCoinError::not_found(RESOURCE, coin.id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CoinId) -> MemeCoinResult<Coin> {
        debug!("Finding coin by id: {}", id);

        let row = sqlx::query_as::<_, CoinRow>(
            r"
            SELECT id, name, description, created_at, updated_at, popularity_score
            FROM coins
            WHERE id = ?
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.ok_or_else(|| MemeCoinError::not_found(RESOURCE, id))?
            .try_into()
    }

    async fn delete_by_id(&self, id: CoinId) -> MemeCoinResult<()> {
        debug!("Deleting coin: {}", id);

        let result = sqlx::query("DELETE FROM coins WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        if result.rows_affected() == 0 {
            return Err(MemeCoinError::not_found(RESOURCE, id));
        }
        Ok(())
    }

    async fn incr_popularity_score(&self, id: CoinId) -> MemeCoinResult<()> {
        debug!("Poking coin: {}", id);

        let result = sqlx::query(
            r"
            UPDATE coins
            SET popularity_score = popularity_score + 1,
                updated_at = GREATEST(created_at, ?)
            WHERE id = ?
            ",
        )
        .bind(now_millis().timestamp_millis())
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(MemeCoinError::not_found(RESOURCE, id));
        }
        Ok(())
    }
}

impl std::fmt::Debug for MySqlCoinDao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlCoinDao").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(description: Option<&str>) -> CoinRow {
        CoinRow {
            id: 7,
            name: "doge".to_string(),
            description: description.map(ToString::to_string),
            created_at: 1_717_000_000_123,
            updated_at: 1_717_000_000_456,
            popularity_score: 3,
        }
    }

    #[test]
    fn test_row_to_coin() {
        let coin = Coin::try_from(row(Some("wow"))).unwrap();
        assert_eq!(coin.id, CoinId(7));
        assert_eq!(coin.description, "wow");
        assert_eq!(coin.created_at.timestamp_millis(), 1_717_000_000_123);
        assert_eq!(coin.updated_at.timestamp_millis(), 1_717_000_000_456);
        assert_eq!(coin.popularity_score, 3);
    }

    #[test]
    fn test_null_description_reads_as_empty() {
        let coin = Coin::try_from(row(None)).unwrap();
        assert_eq!(coin.description, "");
    }

    #[test]
    fn test_out_of_range_timestamp_is_rejected() {
        let mut bad = row(None);
        bad.created_at = i64::MAX;
        assert!(matches!(
            Coin::try_from(bad),
            Err(MemeCoinError::Internal(_))
        ));
    }

    #[test]
    fn test_empty_description_binds_null() {
        assert_eq!(nullable(""), None);
        assert_eq!(nullable("wow"), Some("wow"));
    }

    #[test]
    fn test_non_unique_insert_error_maps_to_database() {
        let err = insert_error(sqlx::Error::PoolTimedOut, "doge");
        assert!(matches!(err, MemeCoinError::Database(_)));
    }
}
