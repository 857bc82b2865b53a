//! Detached, time-boxed cache maintenance.

use crate::cache::CacheError;
use memecoin_core::CoinId;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Budget for a single background cache task (populate or invalidate).
pub const BACKGROUND_TASK_TIMEOUT: Duration = Duration::from_millis(100);

/// Spawns `task` onto the runtime, bounded by `budget`.
///
/// The task outlives the request that started it. Failures and timeouts are
/// logged with the coin id and operation, then dropped.
pub(crate) fn spawn_cache_task<F>(
    operation: &'static str,
    coin_id: CoinId,
    budget: Duration,
    task: F,
) -> JoinHandle<()>
where
    F: Future<Output = Result<(), CacheError>> + Send + 'static,
{
    tokio::spawn(async move {
        match tokio::time::timeout(budget, task).await {
            Ok(Ok(())) => debug!(coin_id = %coin_id, operation, "background cache task done"),
            Ok(Err(e)) => error!(
                coin_id = %coin_id,
                operation,
                error = %e,
                "background cache task failed"
            ),
            Err(_) => error!(
                coin_id = %coin_id,
                operation,
                budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
                "background cache task timed out"
            ),
        }
    })
}
