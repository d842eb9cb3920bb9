//! In-process [`Store`] used when no database is configured.
//!
//! Accounts live in a `BTreeMap` keyed by id, so listings come back in id
//! order, matching the Postgres store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CreateAccountParams, Store, StoreError};
use crate::models::account::{Account, ListAccountsParams};

#[derive(Debug)]
struct Inner {
    accounts: BTreeMap<i64, Account>,
    next_id: i64,
}

/// Store that keeps accounts in memory for the lifetime of the process.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                accounts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_account(&self, params: CreateAccountParams) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("account id space exhausted".to_string()))?;

        let account = Account {
            id,
            owner: params.owner,
            balance: params.balance,
            currency: params.currency,
            created_at: Utc::now(),
        };
        inner.accounts.insert(id, account.clone());
        tracing::debug!(id, "account stored in memory");

        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        self.inner
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_accounts(&self, params: ListAccountsParams) -> Result<Vec<Account>, StoreError> {
        let offset = usize::try_from(params.offset)
            .map_err(|_| StoreError::Backend(format!("invalid offset {}", params.offset)))?;
        let limit = usize::try_from(params.limit)
            .map_err(|_| StoreError::Backend(format!("invalid limit {}", params.limit)))?;

        let inner = self.inner.read().await;
        Ok(inner
            .accounts
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_accounts(&self) -> Result<i64, StoreError> {
        let inner = self.inner.read().await;
        i64::try_from(inner.accounts.len())
            .map_err(|_| StoreError::Backend("account count overflow".to_string()))
    }
}
