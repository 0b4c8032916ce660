//! Persistence gateway for the catalog.
//!
//! All row access goes through [`Store`]. Mutating operations run inside an
//! explicit transaction: commit on success, rollback on any early return, so
//! a failed write never leaves a half-applied row. Every call is bounded by
//! a timeout and surfaces `Unavailable` on expiry.

mod books;
mod users;

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::db::DbPool;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                // SQLite reports CHECK/NOT NULL/UNIQUE rejections uniformly
                if msg.contains("constraint failed") {
                    StoreError::Constraint(msg.to_string())
                } else {
                    StoreError::Unavailable(msg.to_string())
                }
            }
            sqlx::Error::PoolTimedOut => {
                StoreError::Unavailable("connection pool timed out".to_string())
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

/// Handle to the relational store. Cheap to clone; wraps the shared pool.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
    timeout: Duration,
}

impl Store {
    pub fn new(pool: DbPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Run a store operation under the configured deadline.
    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Unavailable(
                "query deadline exceeded".to_string(),
            )),
        }
    }
}
