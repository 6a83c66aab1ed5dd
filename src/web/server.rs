//! HTTP server wiring.

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;
use std::sync::Arc;

use crate::error::GigBoardResult;
use crate::firestore::FirestoreClient;
use crate::gigs::GigStore;

use super::routes::{self, AppState};

/// HTTP server for the gig board.
///
/// Serves the jobs list, the submission endpoint, the gig detail page data
/// and the by-state convenience queries.
pub struct GigBoardHttpServer {
    state: web::Data<AppState>,
    bind_address: String,
}

impl GigBoardHttpServer {
    pub fn new(store: GigStore, firestore: Arc<FirestoreClient>, bind_address: &str) -> Self {
        Self {
            state: web::Data::new(AppState { store, firestore }),
            bind_address: bind_address.to_string(),
        }
    }

    /// Run the server until shutdown.
    pub async fn run(&self) -> GigBoardResult<()> {
        info!("HTTP server running on {}", self.bind_address);

        let state = self.state.clone();
        let server = HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(state.clone())
                .configure(routes::configure)
        })
        .bind(&self.bind_address)?
        .run();

        server.await?;
        Ok(())
    }
}
