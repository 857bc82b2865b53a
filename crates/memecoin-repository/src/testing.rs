//! In-memory fakes for the DAO and cache, with call counters and fault
//! injection. Compiled for this crate's tests and behind the `testing`
//! feature for downstream crates.

use crate::cache::{CacheError, CoinCache};
use crate::dao::CoinDao;
use async_trait::async_trait;
use memecoin_core::{now_millis, Coin, CoinId, MemeCoinError, MemeCoinResult, NewCoin};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

/// Polls `condition` every few milliseconds until it holds or `timeout`
/// elapses. Returns whether it held.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

// =============================================================================
// DAO
// =============================================================================

/// In-memory [`CoinDao`] with a unique-name constraint.
#[derive(Debug)]
pub struct InMemoryCoinDao {
    rows: Mutex<BTreeMap<CoinId, Coin>>,
    next_id: AtomicI64,
    failing: AtomicBool,
    updates: AtomicUsize,
    finds: AtomicUsize,
}

impl Default for InMemoryCoinDao {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            failing: AtomicBool::new(false),
            updates: AtomicUsize::new(0),
            finds: AtomicUsize::new(0),
        }
    }
}

impl InMemoryCoinDao {
    /// Creates an empty DAO.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `coin` as-is, bypassing counters and id assignment.
    pub fn seed(&self, coin: Coin) {
        self.next_id
            .fetch_max(coin.id.into_inner() + 1, Ordering::SeqCst);
        lock(&self.rows).insert(coin.id, coin);
    }

    /// Reads the stored row without counting a call.
    #[must_use]
    pub fn row(&self, id: CoinId) -> Option<Coin> {
        lock(&self.rows).get(&id).cloned()
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    /// Whether no rows are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes every subsequent call fail with a store error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    #[must_use]
    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn find_calls(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    fn check_failing(&self) -> MemeCoinResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MemeCoinError::database("injected store failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl CoinDao for InMemoryCoinDao {
    async fn insert(&self, new_coin: &NewCoin) -> MemeCoinResult<Coin> {
        self.check_failing()?;

        let mut rows = lock(&self.rows);
        if rows.values().any(|c| c.name == new_coin.name) {
            return Err(MemeCoinError::duplicate_name(&new_coin.name));
        }
        let id = CoinId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let coin = new_coin.clone().into_coin(id, now_millis());
        rows.insert(id, coin.clone());
        Ok(coin)
    }

    async fn update_by_id(&self, coin: &Coin) -> MemeCoinResult<()> {
        bump(&self.updates);
        self.check_failing()?;

        let mut rows = lock(&self.rows);
        let row = rows
            .get_mut(&coin.id)
            .ok_or_else(|| MemeCoinError::not_found("coin", coin.id))?;
        row.description.clone_from(&coin.description);
        row.touch();
        Ok(())
    }

    async fn find_by_id(&self, id: CoinId) -> MemeCoinResult<Coin> {
        bump(&self.finds);
        self.check_failing()?;

        self.row(id)
            .ok_or_else(|| MemeCoinError::not_found("coin", id))
    }

    async fn delete_by_id(&self, id: CoinId) -> MemeCoinResult<()> {
        self.check_failing()?;

        lock(&self.rows)
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| MemeCoinError::not_found("coin", id))
    }

    async fn incr_popularity_score(&self, id: CoinId) -> MemeCoinResult<()> {
        self.check_failing()?;

        let mut rows = lock(&self.rows);
        let row = rows
            .get_mut(&id)
            .ok_or_else(|| MemeCoinError::not_found("coin", id))?;
        row.popularity_score = row.popularity_score.saturating_add(1);
        row.touch();
        Ok(())
    }
}

// =============================================================================
// Cache
// =============================================================================

/// In-memory [`CoinCache`] that stores JSON like the Redis cache does.
#[derive(Debug, Default)]
pub struct InMemoryCoinCache {
    entries: Mutex<HashMap<CoinId, String>>,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_del: AtomicBool,
    set_delay: Mutex<Option<Duration>>,
    del_delay: Mutex<Option<Duration>>,
    sets: AtomicUsize,
    dels: AtomicUsize,
}

impl InMemoryCoinCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a snapshot without counting a call.
    ///
    /// # Panics
    ///
    /// Panics if the coin cannot be serialized.
    pub fn seed(&self, coin: &Coin) {
        let json = serde_json::to_string(coin).expect("coin serializes");
        lock(&self.entries).insert(coin.id, json);
    }

    /// Stores a raw value, e.g. to simulate a corrupt entry.
    pub fn seed_raw(&self, id: CoinId, value: impl Into<String>) {
        lock(&self.entries).insert(id, value.into());
    }

    /// Whether an entry exists for `id`.
    #[must_use]
    pub fn contains(&self, id: CoinId) -> bool {
        lock(&self.entries).contains_key(&id)
    }

    /// Makes `get` fail with a backend error.
    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    /// Makes `set` fail with a backend error.
    pub fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    /// Makes `del` fail with a backend error.
    pub fn fail_del(&self, fail: bool) {
        self.fail_del.store(fail, Ordering::SeqCst);
    }

    /// Delays every `set` by `delay` before it takes effect.
    pub fn delay_set(&self, delay: Option<Duration>) {
        *lock(&self.set_delay) = delay;
    }

    /// Delays every `del` by `delay` before it takes effect.
    pub fn delay_del(&self, delay: Option<Duration>) {
        *lock(&self.del_delay) = delay;
    }

    #[must_use]
    pub fn set_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn del_calls(&self) -> usize {
        self.dels.load(Ordering::SeqCst)
    }

    async fn pause(slot: &Mutex<Option<Duration>>) {
        let delay = *lock(slot);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CoinCache for InMemoryCoinCache {
    async fn get(&self, id: CoinId) -> Result<Coin, CacheError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("injected get failure".to_string()));
        }

        let json = lock(&self.entries)
            .get(&id)
            .cloned()
            .ok_or(CacheError::KeyNotFound)?;
        Ok(serde_json::from_str(&json)?)
    }

    async fn set(&self, coin: &Coin) -> Result<(), CacheError> {
        bump(&self.sets);
        Self::pause(&self.set_delay).await;
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("injected set failure".to_string()));
        }

        let json = serde_json::to_string(coin)?;
        lock(&self.entries).insert(coin.id, json);
        Ok(())
    }

    async fn del(&self, id: CoinId) -> Result<(), CacheError> {
        bump(&self.dels);
        Self::pause(&self.del_delay).await;
        if self.fail_del.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("injected del failure".to_string()));
        }

        lock(&self.entries).remove(&id);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
