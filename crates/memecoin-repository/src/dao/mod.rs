//! DAO (Data Access Object) layer.
//!
//! DAOs provide low-level, single-source data access abstractions.
//! Each DAO interface maps to one data source.
//!
//! Hierarchy:
//! ```text
//! Service → Repository (interface + impl) → DAO (interface + impl) → DB
//! ```

pub mod coin_dao;
pub mod r#impl;

pub use coin_dao::CoinDao;
pub use r#impl::MySqlCoinDao;
