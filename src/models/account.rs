//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Store entity representing an account
//! - `Currency`: the closed set of supported currencies
//! - `CreateAccountRequest`, `GetAccountPath`, `ListAccountsQuery`: validated request inputs
//! - `ListAccountsResponse`: Response body for the paginated listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Smallest accepted `pageSize`.
pub const MIN_PAGE_SIZE: i64 = 5;

/// Largest accepted `pageSize`.
pub const MAX_PAGE_SIZE: i64 = 20;

/// `pageSize` used when the query string omits it.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// `page` used when the query string omits it.
pub const DEFAULT_PAGE: i64 = 1;

/// Supported account currencies.
///
/// Stored as the Postgres enum type `currency` and serialized as the
/// upper-case ISO code (`"USD"`, `"EUR"`, `"VND"`). Any other code fails
/// deserialization, which surfaces as a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "currency", rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Vnd,
}

/// Represents an account record held by the store.
///
/// # Balance Storage
///
/// Balances are stored as `i64` minor units. Accounts are always created
/// with a zero balance; this service never changes it.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier, always positive
    pub id: i64,

    /// Name of the account holder
    pub owner: String,

    /// Current balance in minor units
    pub balance: i64,

    pub currency: Currency,

    /// Timestamp when account was created
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "owner": "alice",
///   "currency": "USD"
/// }
/// ```
///
/// # Validation
///
/// - `owner`: Required, must contain a non-whitespace character
/// - `currency`: Required, one of USD, EUR, VND
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub owner: String,
    pub currency: Currency,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.owner.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "owner must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Path parameters for `GET /api/v1/accounts/{id}`.
#[derive(Debug, Deserialize)]
pub struct GetAccountPath {
    pub id: i64,
}

impl GetAccountPath {
    /// Returns the account id once it is known to be positive.
    pub fn validate(&self) -> Result<i64, AppError> {
        if self.id < 1 {
            return Err(AppError::InvalidRequest(
                "id must be a positive integer".to_string(),
            ));
        }
        Ok(self.id)
    }
}

/// Query parameters for `GET /api/v1/accounts`.
///
/// Both parameters are optional; see [`DEFAULT_PAGE`] and [`DEFAULT_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListAccountsQuery {
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_page_size", rename = "pageSize")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListAccountsQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Limit/offset window derived from a validated [`ListAccountsQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListAccountsParams {
    pub limit: i64,
    pub offset: i64,
}

impl ListAccountsQuery {
    /// Check the bounds and translate page numbers into a store window.
    ///
    /// `offset = (page - 1) * pageSize`, `limit = pageSize`. A page far enough
    /// out that the offset overflows `i64` is rejected like any other bad input.
    pub fn validate(&self) -> Result<ListAccountsParams, AppError> {
        if self.page < 1 {
            return Err(AppError::InvalidRequest(
                "page must be at least 1".to_string(),
            ));
        }

        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(AppError::InvalidRequest(format!(
                "pageSize must be between {} and {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE
            )));
        }

        let offset = (self.page - 1)
            .checked_mul(self.page_size)
            .ok_or_else(|| AppError::InvalidRequest("page is out of range".to_string()))?;

        Ok(ListAccountsParams {
            limit: self.page_size,
            offset,
        })
    }
}

/// Response body for the paginated account listing.
///
/// # JSON Example
///
/// ```json
/// {
///   "accounts": [ { "id": 1, "owner": "alice", "balance": 0, "currency": "USD", "created_at": "..." } ],
///   "page": 1,
///   "pageSize": 10,
///   "total": 1
/// }
/// ```
///
/// `total` is read independently of `accounts` and may not match the page
/// exactly if accounts are created while the request is in flight.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListAccountsResponse {
    pub accounts: Vec<Account>,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: i64, page_size: i64) -> ListAccountsQuery {
        ListAccountsQuery { page, page_size }
    }

    #[test]
    fn defaults_give_first_ten() {
        let params = ListAccountsQuery::default().validate().unwrap();
        assert_eq!(params, ListAccountsParams { limit: 10, offset: 0 });
    }

    #[test]
    fn offset_follows_page_number() {
        let params = query(3, 5).validate().unwrap();
        assert_eq!(params, ListAccountsParams { limit: 5, offset: 10 });
    }

    #[test]
    fn page_size_bounds_are_inclusive() {
        assert!(query(1, 5).validate().is_ok());
        assert!(query(1, 20).validate().is_ok());
        assert!(matches!(query(1, 4).validate(), Err(AppError::InvalidRequest(_))));
        assert!(matches!(query(1, 21).validate(), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(matches!(query(0, 10).validate(), Err(AppError::InvalidRequest(_))));
        assert!(matches!(query(-4, 10).validate(), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn overflowing_offset_is_rejected() {
        assert!(matches!(
            query(i64::MAX, 20).validate(),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn blank_owner_is_rejected() {
        let request = CreateAccountRequest {
            owner: "   ".to_string(),
            currency: Currency::Eur,
        };
        assert!(matches!(request.validate(), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn non_positive_ids_are_rejected() {
        assert!(GetAccountPath { id: 0 }.validate().is_err());
        assert!(GetAccountPath { id: -1 }.validate().is_err());
        assert_eq!(GetAccountPath { id: 7 }.validate().unwrap(), 7);
    }

    #[test]
    fn currency_codes_round_through_json() {
        let currency: Currency = serde_json::from_str("\"VND\"").unwrap();
        assert_eq!(currency, Currency::Vnd);
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        assert!(serde_json::from_str::<Currency>("\"GBP\"").is_err());
    }
}
