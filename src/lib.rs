//! # GigBoard
//!
//! A small gig-posting web application backed by two stores: a local record
//! store for submissions and a Firestore document collection reached over
//! its plain REST interface, kept in sync by an explicit dual write.
//!
//! ## Components
//!
//! * `firestore` - REST adapter: tagged-value codec, structured-query
//!   builder and the document gateway with a read-through cache
//! * `gigs` - submission record, local store, mirror payload and the
//!   domain convenience queries
//! * `web` - actix-web server exposing the jobs list, submission endpoint
//!   and detail/by-state pages
//! * `error` - application-level error types
//!
//! The Firestore adapter is deliberately narrow: it supports the value
//! types and query shapes the application uses, nothing more.

#![recursion_limit = "256"]

pub mod error;
pub mod firestore;
pub mod gigs;
pub mod web;

pub use error::{GigBoardError, GigBoardResult};
pub use firestore::{
    DocumentValue, FieldFilter, FilterOp, FirestoreClient, FirestoreConfig, FirestoreError,
    FirestoreResult,
};
pub use gigs::{GigRecord, GigStore};
pub use web::GigBoardHttpServer;
