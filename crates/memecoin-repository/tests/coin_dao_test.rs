//! Integration tests for `MySqlCoinDao`.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker; run with `cargo test -- --ignored`.

mod common;

use common::TestDatabase;
use memecoin_core::{CoinId, MemeCoinError, NewCoin};
use memecoin_repository::{CoinDao, MySqlCoinDao};

async fn dao() -> (TestDatabase, MySqlCoinDao) {
    let db = TestDatabase::new().await;
    let dao = MySqlCoinDao::new(db.pool());
    (db, dao)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_find_by_id() {
    let (_db, dao) = dao().await;

    let created = dao
        .insert(&NewCoin::new("doge", "wow"))
        .await
        .expect("Failed to insert coin");
    assert!(created.id.into_inner() > 0);
    assert_eq!(created.popularity_score, 0);
    assert_eq!(created.created_at, created.updated_at);

    let found = dao.find_by_id(created.id).await.expect("Coin not found");
    assert_eq!(found, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_empty_description_round_trips() {
    let (_db, dao) = dao().await;

    let created = dao.insert(&NewCoin::new("pepe", "")).await.unwrap();
    let found = dao.find_by_id(created.id).await.unwrap();

    assert_eq!(found.description, "");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_name_is_rejected() {
    let (_db, dao) = dao().await;

    dao.insert(&NewCoin::new("doge", "wow")).await.unwrap();
    let err = dao.insert(&NewCoin::new("doge", "again")).await.unwrap_err();

    assert!(matches!(err, MemeCoinError::DuplicateName(ref name) if name == "doge"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_missing_is_not_found() {
    let (_db, dao) = dao().await;
    let err = dao.find_by_id(CoinId::new(12345)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_description() {
    let (_db, dao) = dao().await;

    let mut coin = dao.insert(&NewCoin::new("doge", "wow")).await.unwrap();
    coin.update_description("much wow");
    dao.update_by_id(&coin).await.unwrap();

    let found = dao.find_by_id(coin.id).await.unwrap();
    assert_eq!(found.description, "much wow");
    assert!(found.updated_at >= found.created_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_with_unchanged_description_succeeds() {
    let (_db, dao) = dao().await;

    let coin = dao.insert(&NewCoin::new("doge", "wow")).await.unwrap();

    dao.update_by_id(&coin).await.unwrap();
    dao.update_by_id(&coin).await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_is_not_found() {
    let (_db, dao) = dao().await;
    let coin = dao.insert(&NewCoin::new("doge", "wow")).await.unwrap();
    dao.delete_by_id(coin.id).await.unwrap();

    let err = dao.update_by_id(&coin).await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_incr_popularity_score_is_atomic() {
    let (_db, dao) = dao().await;
    let coin = dao.insert(&NewCoin::new("doge", "wow")).await.unwrap();

    let pokes = (0..10).map(|_| dao.incr_popularity_score(coin.id));
    for result in futures::future::join_all(pokes).await {
        result.unwrap();
    }

    let found = dao.find_by_id(coin.id).await.unwrap();
    assert_eq!(found.popularity_score, 10);
    assert!(found.updated_at >= coin.updated_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_incr_missing_is_not_found() {
    let (_db, dao) = dao().await;
    let err = dao.incr_popularity_score(CoinId::new(999)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete() {
    let (_db, dao) = dao().await;
    let coin = dao.insert(&NewCoin::new("doge", "wow")).await.unwrap();

    dao.delete_by_id(coin.id).await.unwrap();

    assert!(dao.find_by_id(coin.id).await.unwrap_err().is_not_found());
    assert!(dao.delete_by_id(coin.id).await.unwrap_err().is_not_found());
}
