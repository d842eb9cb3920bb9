//! Account service - business logic between the HTTP handlers and the store.
//!
//! Inputs arriving here are already validated. Store failures are never
//! retried: creation is not idempotent, and a failed read means either
//! absence or a store fault, neither of which a local retry fixes.

use crate::{
    error::AppError,
    models::account::{Account, CreateAccountRequest, ListAccountsQuery, ListAccountsResponse},
    store::{CreateAccountParams, Store},
};

/// Create an account with a zero opening balance.
///
/// # Errors
///
/// - `Store`: the store rejected the insert
pub async fn create_account(
    store: &dyn Store,
    request: CreateAccountRequest,
) -> Result<Account, AppError> {
    let params = CreateAccountParams {
        owner: request.owner,
        currency: request.currency,
        balance: 0,
    };

    let account = store.create_account(params).await?;
    tracing::info!(id = account.id, "account created");

    Ok(account)
}

/// Fetch one account by id.
///
/// # Errors
///
/// - `AccountNotFound`: no account has this id
/// - `Store`: any other store failure
pub async fn get_account(store: &dyn Store, id: i64) -> Result<Account, AppError> {
    Ok(store.get_account(id).await?)
}

/// Fetch one page of accounts together with the total account count.
///
/// # Process
///
/// 1. Translate `page`/`pageSize` into a limit/offset window
/// 2. Run the page query and the count query concurrently
/// 3. Wait for both to finish, even when one of them fails
/// 4. Report the page error first, then the count error, else the combined result
///
/// The two reads are independent, so `total` reflects the store at some
/// moment during the request and may disagree with the page if accounts
/// are created in between. No transaction is opened to prevent that.
///
/// # Errors
///
/// - `InvalidRequest`: page or pageSize out of range (the store is not touched)
/// - `Store`: the page query failed, or it succeeded and the count query failed
pub async fn list_accounts(
    store: &dyn Store,
    query: ListAccountsQuery,
) -> Result<ListAccountsResponse, AppError> {
    let params = query.validate()?;

    // Both futures are polled to completion before either result is inspected.
    let (accounts, total) = tokio::join!(store.list_accounts(params), store.count_accounts());

    tracing::debug!(
        page = query.page,
        page_size = query.page_size,
        list_ok = accounts.is_ok(),
        count_ok = total.is_ok(),
        "account page lookups finished"
    );

    let accounts = accounts?;
    let total = total?;

    Ok(ListAccountsResponse {
        accounts,
        page: query.page,
        page_size: query.page_size,
        total,
    })
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use super::*;
    use crate::{
        models::account::{Currency, ListAccountsParams},
        store::{MemoryStore, StoreError},
    };

    /// Store whose list and count calls can be made to fail, and which
    /// records how many of each call completed.
    #[derive(Default)]
    struct ScriptedStore {
        list_error: Option<&'static str>,
        count_error: Option<&'static str>,
        // When set, list and count both wait here, so they only finish if
        // they are running at the same time.
        rendezvous: Option<Arc<Barrier>>,
        list_calls: AtomicUsize,
        count_calls: AtomicUsize,
    }

    impl ScriptedStore {
        async fn meet(&self) {
            if let Some(barrier) = &self.rendezvous {
                barrier.wait().await;
            }
        }
    }

    #[async_trait]
    impl Store for ScriptedStore {
        async fn create_account(&self, _: CreateAccountParams) -> Result<Account, StoreError> {
            Err(StoreError::Backend("insert rejected".to_string()))
        }

        async fn get_account(&self, _: i64) -> Result<Account, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn list_accounts(&self, _: ListAccountsParams) -> Result<Vec<Account>, StoreError> {
            self.meet().await;
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            match self.list_error {
                Some(msg) => Err(StoreError::Backend(msg.to_string())),
                None => Ok(Vec::new()),
            }
        }

        async fn count_accounts(&self) -> Result<i64, StoreError> {
            self.meet().await;
            // Yield so the list side finishes first when it fails fast
            tokio::task::yield_now().await;
            self.count_calls.fetch_add(1, Ordering::SeqCst);
            match self.count_error {
                Some(msg) => Err(StoreError::Backend(msg.to_string())),
                None => Ok(42),
            }
        }
    }

    fn store_message(err: AppError) -> String {
        match err {
            AppError::Store(StoreError::Backend(msg)) => msg,
            other => panic!("expected a store error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn created_accounts_start_at_zero() {
        let store = MemoryStore::new();
        let account = create_account(
            &store,
            CreateAccountRequest {
                owner: "alice".to_string(),
                currency: Currency::Usd,
            },
        )
        .await
        .unwrap();

        assert_eq!(account.owner, "alice");
        assert_eq!(account.currency, Currency::Usd);
        assert_eq!(account.balance, 0);
    }

    #[tokio::test]
    async fn missing_account_maps_to_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            get_account(&store, 999_999).await,
            Err(AppError::AccountNotFound)
        ));
    }

    #[tokio::test]
    async fn page_and_count_run_concurrently() {
        let store = ScriptedStore {
            rendezvous: Some(Arc::new(Barrier::new(2))),
            ..Default::default()
        };

        // Sequential execution would leave the first call stuck at the barrier.
        let response = tokio::time::timeout(
            Duration::from_secs(5),
            list_accounts(&store, ListAccountsQuery::default()),
        )
        .await
        .expect("list and count did not overlap")
        .unwrap();

        assert_eq!(response.total, 42);
        assert!(response.accounts.is_empty());
    }

    #[tokio::test]
    async fn list_error_wins_when_both_fail() {
        let store = ScriptedStore {
            list_error: Some("list failed"),
            count_error: Some("count failed"),
            ..Default::default()
        };

        let err = list_accounts(&store, ListAccountsQuery::default())
            .await
            .unwrap_err();

        assert_eq!(store_message(err), "list failed");
    }

    #[tokio::test]
    async fn count_error_reported_when_list_succeeds() {
        let store = ScriptedStore {
            count_error: Some("count failed"),
            ..Default::default()
        };

        let err = list_accounts(&store, ListAccountsQuery::default())
            .await
            .unwrap_err();

        assert_eq!(store_message(err), "count failed");
    }

    #[tokio::test]
    async fn count_still_completes_after_list_fails() {
        let store = ScriptedStore {
            list_error: Some("list failed"),
            ..Default::default()
        };

        let _ = list_accounts(&store, ListAccountsQuery::default()).await;

        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.count_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_page_size_skips_the_store() {
        let store = ScriptedStore::default();
        let query = ListAccountsQuery {
            page: 1,
            page_size: 25,
        };

        assert!(matches!(
            list_accounts(&store, query).await,
            Err(AppError::InvalidRequest(_))
        ));
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.count_calls.load(Ordering::SeqCst), 0);
    }
}
