//! Gig domain: the submission record, its local store, the mirrored
//! document payload and the convenience queries the pages use.

pub mod mirror;
pub mod model;
pub mod queries;
pub mod store;

pub use mirror::{job_document, job_document_at, slugify};
pub use model::{generate_record_id, GigRecord};
pub use store::{GigStore, GigStoreError, GigStoreResult};
