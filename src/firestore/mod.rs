//! Firestore REST adapter: value codec, structured-query builder and the
//! document gateway with its read-through cache.
//!
//! This is not a general Firestore client. It supports exactly the value
//! types and query shapes the application exercises: the primitive scalars,
//! arrays and maps, timestamp strings, EQUAL / ARRAY_CONTAINS filters,
//! AND composition and page-size limits.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod value;

pub use cache::{cache_key, DocumentCache};
pub use client::{FirestoreClient, SortDirection};
pub use config::FirestoreConfig;
pub use error::{FirestoreError, FirestoreResult};
pub use query::{build_query, FieldFilter, FilterOp};
pub use value::{decode_document, decode_value, encode_fields, encode_value, DocumentValue};
