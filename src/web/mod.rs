//! Web surface: the actix-web server and its JSON routes.

pub mod routes;
pub mod server;

pub use routes::{AppState, GigSubmission};
pub use server::GigBoardHttpServer;
