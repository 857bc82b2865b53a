//! `CachedCoinRepository`: cache-aside repository implementation.
//!
//! Implements [`CoinRepository`] over one [`CoinDao`] (source of truth) and
//! one [`CoinCache`] (transient snapshots):
//!
//! ```text
//! Service
//!   ↓ Arc<dyn CoinRepository>
//! CachedCoinRepository
//!   ↓ Arc<dyn CoinDao>          ↓ Arc<dyn CoinCache>
//! MySqlCoinDao                  RedisCoinCache
//! ```
//!
//! Reads try the cache, fall back to the store on any cache failure and
//! repopulate in the background. Writes go to the store first; only after
//! the store write succeeds is the cached snapshot evicted, again in the
//! background. Background work is time-boxed and its failures are logged,
//! never returned.
//!
//! Populate and invalidate tasks are not ordered against each other. A
//! populate that read the store before a later write would otherwise land
//! after that write's eviction, so populates check the coin's
//! [`WriteEpochs`] and evict what they stored if a write happened since
//! their read.
//!
//! [`CoinRepository`]: crate::traits::CoinRepository
//! [`CoinDao`]: crate::dao::CoinDao
//! [`CoinCache`]: crate::cache::CoinCache

use crate::background::{spawn_cache_task, BACKGROUND_TASK_TIMEOUT};
use crate::cache::{CacheError, CoinCache};
use crate::epochs::WriteEpochs;
use crate::{dao::CoinDao, traits::CoinRepository};
use async_trait::async_trait;
use memecoin_core::{Coin, CoinId, MemeCoinResult, NewCoin};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Cache-aside coin repository.
#[derive(Component)]
#[shaku(interface = CoinRepository)]
pub struct CachedCoinRepository {
    #[shaku(inject)]
    dao: Arc<dyn CoinDao>,

    #[shaku(inject)]
    cache: Arc<dyn CoinCache>,

    /// Budget for each background populate or invalidate.
    #[shaku(default = BACKGROUND_TASK_TIMEOUT)]
    background_timeout: Duration,

    /// Advanced after every successful store write.
    #[shaku(default = Arc::new(WriteEpochs::new()))]
    epochs: Arc<WriteEpochs>,
}

impl CachedCoinRepository {
    /// Creates a repository with the default background budget.
    #[must_use]
    pub fn new(dao: Arc<dyn CoinDao>, cache: Arc<dyn CoinCache>) -> Self {
        Self {
            dao,
            cache,
            background_timeout: BACKGROUND_TASK_TIMEOUT,
            epochs: Arc::new(WriteEpochs::new()),
        }
    }

    /// Overrides the background task budget.
    #[must_use]
    pub const fn with_background_timeout(mut self, timeout: Duration) -> Self {
        self.background_timeout = timeout;
        self
    }

    /// Caches `coin`, read from the store while the epoch was `read_epoch`.
    fn populate(&self, coin: Coin, read_epoch: u64) {
        let cache = Arc::clone(&self.cache);
        let epochs = Arc::clone(&self.epochs);
        spawn_cache_task("populate", coin.id, self.background_timeout, async move {
            if epochs.current(coin.id) != read_epoch {
                debug!(coin_id = %coin.id, "Skipping populate of superseded snapshot");
                return Ok(());
            }
            cache.set(&coin).await?;
            // A write may have finished and evicted while the set was in flight.
            if epochs.current(coin.id) != read_epoch {
                debug!(coin_id = %coin.id, "Evicting superseded snapshot");
                cache.del(coin.id).await?;
            }
            Ok(())
        });
    }

    /// Must be called only after the store write succeeded.
    fn invalidate(&self, id: CoinId, operation: &'static str) {
        self.epochs.advance(id);
        let cache = Arc::clone(&self.cache);
        spawn_cache_task(operation, id, self.background_timeout, async move {
            cache.del(id).await
        });
    }
}

#[async_trait]
impl CoinRepository for CachedCoinRepository {
    async fn create(&self, new_coin: &NewCoin) -> MemeCoinResult<Coin> {
        debug!("Repository: create coin {}", new_coin.name);
        self.dao.insert(new_coin).await
    }

    async fn update(&self, coin: &Coin) -> MemeCoinResult<()> {
        debug!("Repository: update coin {}", coin.id);
        self.dao.update_by_id(coin).await?;
        self.invalidate(coin.id, "update");
        Ok(())
    }

    async fn find_by_id(&self, id: CoinId) -> MemeCoinResult<Coin> {
        match self.cache.get(id).await {
            Ok(coin) => {
                debug!(coin_id = %id, "Cache hit");
                return Ok(coin);
            }
            Err(CacheError::KeyNotFound) => debug!(coin_id = %id, "Cache miss"),
            Err(e) => warn!(coin_id = %id, error = %e, "Cache read failed, using store"),
        }

        let read_epoch = self.epochs.current(id);
        let coin = self.dao.find_by_id(id).await?;
        self.populate(coin.clone(), read_epoch);
        Ok(coin)
    }

    async fn delete_by_id(&self, id: CoinId) -> MemeCoinResult<()> {
        debug!("Repository: delete coin {}", id);
        self.dao.delete_by_id(id).await?;
        self.invalidate(id, "delete");
        Ok(())
    }

    async fn incr_popularity_score(&self, id: CoinId) -> MemeCoinResult<()> {
        debug!("Repository: poke coin {}", id);
        self.dao.incr_popularity_score(id).await?;
        self.invalidate(id, "poke");
        Ok(())
    }
}

impl std::fmt::Debug for CachedCoinRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedCoinRepository")
            .field("background_timeout", &self.background_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{wait_until, InMemoryCoinCache, InMemoryCoinDao};
    use memecoin_core::MemeCoinError;
    use std::time::Instant;

    const WAIT: Duration = Duration::from_secs(2);

    struct Fixture {
        dao: Arc<InMemoryCoinDao>,
        cache: Arc<InMemoryCoinCache>,
        repo: CachedCoinRepository,
    }

    fn fixture() -> Fixture {
        let dao = Arc::new(InMemoryCoinDao::new());
        let cache = Arc::new(InMemoryCoinCache::new());
        let repo = CachedCoinRepository::new(dao.clone(), cache.clone());
        Fixture { dao, cache, repo }
    }

    fn doge() -> NewCoin {
        NewCoin::new("doge", "wow")
    }

    // =========================================================================
    // create
    // =========================================================================

    #[tokio::test]
    async fn test_create_assigns_id_and_zero_score() {
        let f = fixture();

        let coin = f.repo.create(&doge()).await.unwrap();

        assert!(coin.id.into_inner() > 0);
        assert_eq!(coin.popularity_score, 0);
        assert_eq!(coin.created_at, coin.updated_at);
        assert_eq!(f.cache.set_calls(), 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let f = fixture();
        f.repo.create(&doge()).await.unwrap();

        let err = f.repo.create(&NewCoin::new("doge", "again")).await.unwrap_err();

        assert!(matches!(err, MemeCoinError::DuplicateName(ref name) if name == "doge"));
        assert_eq!(f.dao.len(), 1);
        assert_eq!(f.dao.row(CoinId::new(1)).unwrap().description, "wow");
    }

    // =========================================================================
    // find_by_id
    // =========================================================================

    #[tokio::test]
    async fn test_cache_hit_skips_store() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();
        f.cache.seed(&coin);

        let found = f.repo.find_by_id(coin.id).await.unwrap();

        assert_eq!(found, coin);
        assert_eq!(f.dao.find_calls(), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_reads_store_and_populates_once() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();

        let found = f.repo.find_by_id(coin.id).await.unwrap();

        assert_eq!(found, coin);
        assert_eq!(f.dao.find_calls(), 1);
        assert!(wait_until(WAIT, || f.cache.contains(coin.id)).await);
        assert_eq!(f.cache.set_calls(), 1);
    }

    #[tokio::test]
    async fn test_cache_error_behaves_like_miss() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();
        f.cache.fail_get(true);

        let found = f.repo.find_by_id(coin.id).await.unwrap();

        assert_eq!(found, coin);
        assert_eq!(f.dao.find_calls(), 1);
        assert!(wait_until(WAIT, || f.cache.set_calls() == 1).await);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_falls_back_to_store() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();
        f.cache.seed_raw(coin.id, "garbage");

        let found = f.repo.find_by_id(coin.id).await.unwrap();

        assert_eq!(found, coin);
        assert_eq!(f.dao.find_calls(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found_and_not_cached() {
        let f = fixture();

        let err = f.repo.find_by_id(CoinId::new(99)).await.unwrap_err();

        assert!(err.is_not_found());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(f.cache.set_calls(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let f = fixture();
        f.dao.set_failing(true);

        let err = f.repo.find_by_id(CoinId::new(1)).await.unwrap_err();

        assert!(matches!(err, MemeCoinError::Database(_)));
    }

    #[tokio::test]
    async fn test_populate_failure_is_not_surfaced() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();
        f.cache.fail_set(true);

        assert!(f.repo.find_by_id(coin.id).await.is_ok());
        assert!(wait_until(WAIT, || f.cache.set_calls() == 1).await);
    }

    // =========================================================================
    // poke
    // =========================================================================

    #[tokio::test]
    async fn test_poke_increments_by_one_and_refreshes_updated_at() {
        let f = fixture();
        let created = Coin::millis_to_datetime(1_700_000_000_000).unwrap();
        f.dao.seed(doge().into_coin(CoinId::new(1), created));

        f.repo.incr_popularity_score(CoinId::new(1)).await.unwrap();

        let row = f.dao.row(CoinId::new(1)).unwrap();
        assert_eq!(row.popularity_score, 1);
        assert!(row.updated_at > created);
        assert!(wait_until(WAIT, || f.cache.del_calls() == 1).await);
    }

    #[tokio::test]
    async fn test_concurrent_pokes_both_count() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();

        let (a, b) = tokio::join!(
            f.repo.incr_popularity_score(coin.id),
            f.repo.incr_popularity_score(coin.id)
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(f.dao.row(coin.id).unwrap().popularity_score, 2);
    }

    #[tokio::test]
    async fn test_poke_missing_is_not_found_without_invalidation() {
        let f = fixture();

        let err = f.repo.incr_popularity_score(CoinId::new(404)).await.unwrap_err();

        assert!(err.is_not_found());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(f.cache.del_calls(), 0);
    }

    // =========================================================================
    // update / delete
    // =========================================================================

    #[tokio::test]
    async fn test_update_invalidates_cached_snapshot() {
        let f = fixture();
        let mut coin = f.repo.create(&doge()).await.unwrap();
        f.cache.seed(&coin);

        coin.update_description("much wow");
        f.repo.update(&coin).await.unwrap();

        assert_eq!(f.dao.row(coin.id).unwrap().description, "much wow");
        assert!(wait_until(WAIT, || !f.cache.contains(coin.id)).await);
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_snapshot() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();
        f.cache.seed(&coin);

        f.repo.delete_by_id(coin.id).await.unwrap();

        assert!(f.dao.row(coin.id).is_none());
        assert!(wait_until(WAIT, || !f.cache.contains(coin.id)).await);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let f = fixture();
        let err = f.repo.delete_by_id(CoinId::new(3)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_writes_succeed_when_invalidation_fails() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();
        f.cache.fail_del(true);

        f.repo.update(&coin).await.unwrap();
        f.repo.incr_popularity_score(coin.id).await.unwrap();
        f.repo.delete_by_id(coin.id).await.unwrap();

        assert!(wait_until(WAIT, || f.cache.del_calls() == 3).await);
    }

    #[tokio::test]
    async fn test_store_failure_leaves_cache_untouched() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();
        f.cache.seed(&coin);
        f.dao.set_failing(true);

        assert!(f.repo.update(&coin).await.is_err());
        assert!(f.repo.delete_by_id(coin.id).await.is_err());
        assert!(f.repo.incr_popularity_score(coin.id).await.is_err());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(f.cache.del_calls(), 0);
        assert!(f.cache.contains(coin.id));
    }

    #[tokio::test]
    async fn test_slow_invalidation_does_not_block_caller() {
        let f = fixture();
        let repo = CachedCoinRepository::new(f.dao.clone(), f.cache.clone())
            .with_background_timeout(Duration::from_millis(20));
        let coin = repo.create(&doge()).await.unwrap();
        f.cache.delay_del(Some(Duration::from_secs(5)));

        let started = Instant::now();
        repo.update(&coin).await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_update_of_deleted_coin_is_not_found_without_invalidation() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();
        f.dao.delete_by_id(coin.id).await.unwrap();

        let err = f.repo.update(&coin).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(f.dao.update_calls(), 1);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(f.cache.del_calls(), 0);
    }

    // =========================================================================
    // populate racing a write
    // =========================================================================

    #[tokio::test]
    async fn test_late_populate_does_not_outlive_update() {
        let f = fixture();
        let coin = f.repo.create(&doge()).await.unwrap();
        f.cache.delay_set(Some(Duration::from_millis(50)));

        let mut loaded = f.repo.find_by_id(coin.id).await.unwrap();
        assert!(wait_until(WAIT, || f.cache.set_calls() == 1).await);
        loaded.update_description("much wow");
        f.repo.update(&loaded).await.unwrap();

        // update's eviction, then the populate evicting its own late set
        assert!(wait_until(WAIT, || f.cache.set_calls() == 1 && f.cache.del_calls() == 2).await);
        assert!(!f.cache.contains(coin.id));
        assert_eq!(f.repo.find_by_id(coin.id).await.unwrap().description, "much wow");
    }

    #[tokio::test]
    async fn test_populate_after_write_is_kept() {
        let f = fixture();
        let mut coin = f.repo.create(&doge()).await.unwrap();
        coin.update_description("much wow");
        f.repo.update(&coin).await.unwrap();
        assert!(wait_until(WAIT, || f.cache.del_calls() == 1).await);

        f.repo.find_by_id(coin.id).await.unwrap();

        assert!(wait_until(WAIT, || f.cache.contains(coin.id)).await);
        assert_eq!(f.cache.del_calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_read_then_update_never_leaves_old_description() {
        let f = fixture();
        let mut stale = 0;

        for i in 0..300 {
            let coin = f
                .repo
                .create(&NewCoin::new(format!("coin-{i}"), "wow"))
                .await
                .unwrap();

            let mut loaded = f.repo.find_by_id(coin.id).await.unwrap();
            loaded.update_description("much wow");
            f.repo.update(&loaded).await.unwrap();
            tokio::time::sleep(Duration::from_millis(30)).await;

            if f.repo.find_by_id(coin.id).await.unwrap().description != "much wow" {
                stale += 1;
            }
        }

        assert_eq!(stale, 0);
    }

    // =========================================================================
    // End to end
    // =========================================================================

    #[tokio::test]
    async fn test_doge_lifecycle() {
        let f = fixture();

        let coin = f.repo.create(&doge()).await.unwrap();
        assert_eq!(coin.id, CoinId(1));
        assert_eq!(coin.popularity_score, 0);

        for _ in 0..3 {
            f.repo.incr_popularity_score(coin.id).await.unwrap();
        }
        assert!(wait_until(WAIT, || f.cache.del_calls() == 3).await);

        let found = f.repo.find_by_id(coin.id).await.unwrap();
        assert_eq!(found.popularity_score, 3);
        assert_eq!(f.dao.find_calls(), 1);
        assert!(wait_until(WAIT, || f.cache.contains(coin.id)).await);

        let mut edited = found.clone();
        edited.update_description("much wow");
        f.repo.update(&edited).await.unwrap();
        assert!(wait_until(WAIT, || !f.cache.contains(coin.id)).await);

        let reloaded = f.repo.find_by_id(coin.id).await.unwrap();
        assert_eq!(reloaded.description, "much wow");
        assert_eq!(reloaded.popularity_score, 3);
    }
}
