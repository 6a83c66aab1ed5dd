//! Local persistence for gig records.
//!
//! The store is the relational side of the dual write: the submission is
//! persisted here first, and the caller reads back the generated id and
//! posting timestamp before mirroring the record to the document store.

use chrono::Utc;
use thiserror::Error;

use super::model::{generate_record_id, GigRecord};

#[derive(Error, Debug)]
pub enum GigStoreError {
    #[error("Database error: {0}")]
    Db(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type GigStoreResult<T> = std::result::Result<T, GigStoreError>;

/// Sled-backed gig record store.
#[derive(Clone)]
pub struct GigStore {
    #[allow(dead_code)]
    db: sled::Db,
    gigs: sled::Tree,
}

impl GigStore {
    pub fn new(path: impl AsRef<std::path::Path>) -> GigStoreResult<Self> {
        let db = sled::open(path)?;
        let gigs = db.open_tree("gigs")?;
        Ok(Self { db, gigs })
    }

    /// Persist a new record, assigning an id (when absent) and the posting
    /// timestamp. Returns the stored record so callers can read both back.
    pub fn create(&self, mut gig: GigRecord) -> GigStoreResult<GigRecord> {
        if gig.id.is_empty() {
            gig.id = generate_record_id();
        }
        gig.posted_at = Some(Utc::now());

        let bytes = serde_json::to_vec(&gig)?;
        self.gigs.insert(gig.id.as_bytes(), bytes)?;
        self.gigs.flush()?;
        Ok(gig)
    }

    pub fn get(&self, id: &str) -> GigStoreResult<Option<GigRecord>> {
        match self.gigs.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn list(&self) -> GigStoreResult<Vec<GigRecord>> {
        let mut records = Vec::new();
        for entry in self.gigs.iter() {
            let (_, bytes) = entry?;
            records.push(serde_json::from_slice(&bytes)?);
        }
        Ok(records)
    }
}
