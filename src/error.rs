//! Application-level error type.

use thiserror::Error;

use crate::firestore::FirestoreError;
use crate::gigs::GigStoreError;

/// Unified error for server setup and application wiring.
///
/// Request handlers do not raise these; per the gateway contract they
/// degrade to empty/false/absent responses and log instead.
#[derive(Error, Debug)]
pub enum GigBoardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Firestore(#[from] FirestoreError),

    #[error(transparent)]
    Store(#[from] GigStoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GigBoardResult<T> = std::result::Result<T, GigBoardError>;
