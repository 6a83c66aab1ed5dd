//! JSON route handlers.

use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::firestore::FirestoreClient;
use crate::gigs::{job_document, queries, GigRecord, GigStore};

/// Shared application state for the HTTP server.
pub struct AppState {
    pub store: GigStore,
    pub firestore: Arc<FirestoreClient>,
}

/// Gig submission payload: the record fields plus the zip code, which only
/// exists on the mirrored listing.
#[derive(Debug, Deserialize)]
pub struct GigSubmission {
    #[serde(flatten)]
    pub gig: GigRecord,
    #[serde(default)]
    pub zip: String,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    limit: Option<usize>,
}

/// Mount the API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/jobs", web::get().to(list_jobs))
            .route("/gigs", web::post().to(submit_gig))
            .route("/gigs/{id}", web::get().to(gig_detail))
            .route("/banners/{state}", web::get().to(banners_for_state))
            .route("/restaurants/{state}", web::get().to(restaurants_for_state))
            .route("/stores/{state}", web::get().to(stores_for_state)),
    );
}

/// List jobs currently open for applications.
async fn list_jobs(state: web::Data<AppState>) -> impl Responder {
    let jobs = queries::available_jobs(&state.firestore).await;
    HttpResponse::Ok().json(json!({ "data": jobs }))
}

/// Accept a gig submission.
///
/// Two independent writes: the record is persisted locally first, then
/// mirrored into `app_jobs`. A mirror failure is logged and reported in the
/// response but never rolls back the local insert, so the stores can
/// diverge until the listing is resubmitted.
async fn submit_gig(
    state: web::Data<AppState>,
    payload: web::Json<GigSubmission>,
) -> impl Responder {
    let GigSubmission { gig, zip } = payload.into_inner();

    let created = match state.store.create(gig) {
        Ok(created) => created,
        Err(e) => {
            error!("Failed to store gig submission: {}", e);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": format!("Failed to store gig: {}", e) }));
        }
    };

    let document = job_document(&created, &zip);
    let mirrored = state
        .firestore
        .set_document("app_jobs", &created.id, &document)
        .await;
    if !mirrored {
        error!("Mirror document creation failed for gig {}", created.id);
    }

    HttpResponse::Created().json(json!({
        "data": { "id": created.id, "posted_at": created.posted_at },
        "mirrored": mirrored,
    }))
}

/// Single gig detail, looked up in the mirrored collection by record id.
async fn gig_detail(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let gig_id = path.into_inner();
    match queries::find_gig(&state.firestore, &gig_id).await {
        Some(gig) => {
            let gig_creation = gig.get("gig_creation").cloned().unwrap_or_else(|| json!({}));
            HttpResponse::Ok().json(json!({
                "data": { "gig": gig, "gig_creation": gig_creation }
            }))
        }
        None => HttpResponse::NotFound()
            .json(json!({ "error": format!("Gig '{}' not found", gig_id) })),
    }
}

async fn banners_for_state(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let banners = queries::banners_by_state(&state.firestore, &path.into_inner()).await;
    HttpResponse::Ok().json(json!({ "data": banners }))
}

async fn restaurants_for_state(
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(10);
    let restaurants =
        queries::verified_restaurants_by_state(&state.firestore, &path.into_inner(), limit).await;
    HttpResponse::Ok().json(json!({ "data": restaurants }))
}

async fn stores_for_state(
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(10);
    let stores =
        queries::verified_stores_by_state(&state.firestore, &path.into_inner(), limit).await;
    HttpResponse::Ok().json(json!({ "data": stores }))
}
