//! MySQL DAO implementations.

mod coin_dao_impl;

pub use coin_dao_impl::MySqlCoinDao;
