//! Data models representing store entities and API payloads.

/// Account model and request/response types
pub mod account;
