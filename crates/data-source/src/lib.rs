//! Postgres-backed adapter that reads the approved-schools / demographics
//! join and hands back cleaned [`geo_core::SchoolRecord`]s.

mod config;
mod error;
mod repository;

pub use config::DbConfig;
pub use error::{DataError, Result};
pub use repository::SchoolsRepository;
