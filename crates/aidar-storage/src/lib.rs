//! aidar-storage
//!
//! Generic record persistence. One JSON document per record, kept either in
//! memory or in S3, behind the [`store::Store`] contract.

pub mod backend;
pub mod client;
pub mod error;
pub mod filter;
pub mod s3;
pub mod store;

pub use filter::Filter;
pub use store::{MemoryStore, RecordStore, S3Store, Store};
