//! DAO implementations.
//!
//! Trait definitions live in the parent `dao/` module (e.g. `coin_dao.rs`).
//! Implementations are organized by technology.

pub mod mysql;

pub use mysql::MySqlCoinDao;
