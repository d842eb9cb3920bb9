//! Account HTTP handlers.
//!
//! This module implements the account API endpoints:
//! - POST /api/v1/accounts - Create new account
//! - GET /api/v1/accounts/{id} - Get account by ID
//! - GET /api/v1/accounts - List accounts one page at a time
//!
//! Extractor rejections are taken as `Result` and converted into
//! `AppError::InvalidRequest`, so malformed input gets the same JSON error
//! body as out-of-range input and never reaches the store.

use crate::{
    error::AppError,
    models::account::{
        Account, CreateAccountRequest, GetAccountPath, ListAccountsQuery, ListAccountsResponse,
    },
    services::account_service,
    store::SharedStore,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// {
///   "owner": "alice",
///   "currency": "USD"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created account
/// - **Error (400)**: Missing owner, blank owner or unsupported currency
/// - **Error (500)**: Store error
///
/// ```json
/// {
///   "id": 1,
///   "owner": "alice",
///   "balance": 0,
///   "currency": "USD",
///   "created_at": "2025-12-20T10:00:00Z"
/// }
/// ```
pub async fn create_account(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let account = account_service::create_account(store.as_ref(), request).await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// Get a specific account by ID.
///
/// # URL Parameters
///
/// - `id` - positive integer account id
///
/// # Response
///
/// - **Success (200 OK)**: Returns account details
/// - **Error (400)**: id is not a positive integer
/// - **Error (404)**: No account with this id
/// - **Error (500)**: Store error
pub async fn get_account(
    State(store): State<SharedStore>,
    path: Result<Path<GetAccountPath>, PathRejection>,
) -> Result<Json<Account>, AppError> {
    let Path(path) = path?;
    let id = path.validate()?;

    let account = account_service::get_account(store.as_ref(), id).await?;

    Ok(Json(account))
}

/// List accounts one page at a time.
///
/// # Query Parameters
///
/// - `page` - 1-based page number, defaults to 1
/// - `pageSize` - between 5 and 20, defaults to 10
///
/// # Response
///
/// - **Success (200 OK)**: One page plus the total account count
/// - **Error (400)**: page or pageSize missing the bounds above
/// - **Error (500)**: Either store lookup failed
///
/// ```json
/// {
///   "accounts": [
///     { "id": 1, "owner": "alice", "balance": 0, "currency": "USD", "created_at": "2025-12-20T10:00:00Z" }
///   ],
///   "page": 1,
///   "pageSize": 10,
///   "total": 1
/// }
/// ```
///
/// # Ordering
///
/// Accounts are returned in ascending id order.
pub async fn list_accounts(
    State(store): State<SharedStore>,
    query: Result<Query<ListAccountsQuery>, QueryRejection>,
) -> Result<Json<ListAccountsResponse>, AppError> {
    let Query(query) = query?;

    let response = account_service::list_accounts(store.as_ref(), query).await?;

    Ok(Json(response))
}
