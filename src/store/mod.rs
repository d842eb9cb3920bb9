//! Account persistence.
//!
//! Handlers never talk to a database directly; they go through the [`Store`]
//! trait. Two implementations ship with the service:
//! - [`PgStore`]: PostgreSQL via sqlx
//! - [`MemoryStore`]: process-local, used when no database is configured

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::account::{Account, Currency, ListAccountsParams};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Handle shared by every request. Built once at startup and injected as router state.
pub type SharedStore = Arc<dyn Store>;

/// Failures reported by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No account matches the requested id.
    #[error("account not found")]
    NotFound,

    /// Database operation failed (e.g., connection error, query error).
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Failure raised by a non-SQL backend.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

/// Fields needed to insert an account.
#[derive(Debug, Clone)]
pub struct CreateAccountParams {
    pub owner: String,
    pub currency: Currency,
    pub balance: i64,
}

/// Account persistence operations.
///
/// Implementations handle their own concurrency control; callers take no
/// locks and open no transactions.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert an account and return it with its assigned id.
    async fn create_account(&self, params: CreateAccountParams) -> Result<Account, StoreError>;

    /// Fetch one account. Absence is reported as [`StoreError::NotFound`].
    async fn get_account(&self, id: i64) -> Result<Account, StoreError>;

    /// Fetch at most `limit` accounts ordered by id, skipping `offset`.
    async fn list_accounts(&self, params: ListAccountsParams) -> Result<Vec<Account>, StoreError>;

    /// Total number of accounts.
    async fn count_accounts(&self) -> Result<i64, StoreError>;

    /// Cheap connectivity check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
