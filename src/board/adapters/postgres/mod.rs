//! `PostgreSQL` adapter for the remote board store.

mod models;
mod repository;
mod schema;

pub use repository::{BoardPgPool, PostgresRemoteStore};
