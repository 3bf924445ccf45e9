//! aidar-core
//!
//! Pure domain types, record kinds, and storage key conventions.
//! No AWS SDK dependency; this is the shared vocabulary of the Aidar system.

pub mod error;
pub mod models;
pub mod record;
pub mod store_keys;
