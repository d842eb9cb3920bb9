//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Extracts and validates request data (JSON body, URL params, query string)
//! 2. Delegates to the service layer
//! 3. Returns HTTP response (JSON, status code)

/// Account management endpoints
pub mod accounts;
/// Service health endpoint
pub mod health;
