use clap::Parser;
use log::info;
use std::sync::Arc;

use gigboard::firestore::{FirestoreClient, FirestoreConfig};
use gigboard::gigs::GigStore;
use gigboard::web::GigBoardHttpServer;

/// Command line options for the gig board server.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Port for the HTTP server
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Directory for the local record store
    #[arg(long, default_value = "data/gigboard")]
    data_dir: String,
}

/// Main entry point for the gig board HTTP server.
///
/// # Environment Variables
///
/// * `FIRESTORE_API_KEY` - shared API key for the documents endpoint (required)
/// * `FIRESTORE_PROJECT_ID` - Firestore project id (required)
/// * `FIRESTORE_BASE_URL` - documents endpoint override (e.g. an emulator)
/// * `FIRESTORE_TIMEOUT_SECONDS` - network timeout, default 30
/// * `FIRESTORE_CACHE_TTL_SECONDS` - document cache TTL, default 300
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Starting GigBoard server...");

    let cli = Cli::parse();

    let config = FirestoreConfig::from_env()?;
    let firestore = Arc::new(FirestoreClient::new(config)?);
    let store = GigStore::new(&cli.data_dir)?;

    let bind_address = format!("127.0.0.1:{}", cli.port);
    let server = GigBoardHttpServer::new(store, firestore, &bind_address);
    server.run().await?;

    Ok(())
}
