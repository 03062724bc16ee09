//! Service layer for the toy catalog.
//! - Owns the in-memory collection and keeps the backing store in sync.
//! - Enforces ownership checks on mutation.
//! - Provides clear error types for the HTTP layer to translate.

pub mod errors;
pub mod pagination;
pub mod runtime;
pub mod storage;
#[cfg(test)]
pub mod test_support;
pub mod toy_service;
