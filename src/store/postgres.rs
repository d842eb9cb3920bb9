//! PostgreSQL-backed [`Store`].

use async_trait::async_trait;

use super::{CreateAccountParams, Store, StoreError};
use crate::{
    db::DbPool,
    models::account::{Account, ListAccountsParams},
};

/// Store backed by the `accounts` table.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_account(&self, params: CreateAccountParams) -> Result<Account, StoreError> {
        tracing::debug!(owner = %params.owner, currency = ?params.currency, "inserting account");

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (owner, balance, currency)
            VALUES ($1, $2, $3)
            RETURNING id, owner, balance, currency, created_at
            "#,
        )
        .bind(params.owner)
        .bind(params.balance)
        .bind(params.currency)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        tracing::debug!(id, "fetching account");

        // fetch_one reports a missing row as RowNotFound, which maps to NotFound
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, owner, balance, currency, created_at
            FROM accounts
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn list_accounts(&self, params: ListAccountsParams) -> Result<Vec<Account>, StoreError> {
        tracing::debug!(limit = params.limit, offset = params.offset, "listing accounts");

        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, owner, balance, currency, created_at
            FROM accounts
            ORDER BY id
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn count_accounts(&self) -> Result<i64, StoreError> {
        tracing::debug!("counting accounts");

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
