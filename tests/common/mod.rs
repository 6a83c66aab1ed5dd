//! In-process Firestore REST emulator used by the integration tests.
//!
//! Backs the documents endpoint with a shared map, records the
//! `updateMask.fieldPaths` parameters it receives and counts document GETs
//! so tests can assert cache behavior. The id `boom500` always fails with
//! a 500 to simulate a server-side error.

// Each integration test crate compiles this module separately and uses a
// different subset of it.
#![allow(dead_code)]

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use gigboard::firestore::{decode_document, decode_value};

#[derive(Default)]
pub struct EmulatorState {
    /// "collection/id" (or "collection/id/subcollection/id") ->
    /// {"fields": {...}} wire document.
    pub documents: Mutex<HashMap<String, Value>>,
    /// Field mask of the most recent PATCH, `None` when no mask was sent.
    pub last_update_mask: Mutex<Option<Vec<String>>>,
    /// GET hit counts per "collection/id".
    pub get_hits: Mutex<HashMap<String, usize>>,
}

/// Start the emulator on an ephemeral port; returns the documents base URL
/// and a handle to the shared state.
pub async fn start_emulator() -> (String, web::Data<EmulatorState>) {
    let state = web::Data::new(EmulatorState::default());
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/documents:runQuery", web::post().to(run_query))
            .route("/documents/{collection}", web::get().to(list_collection))
            .route(
                "/documents/{collection}/{id}/{subcollection}",
                web::get().to(get_subcollection),
            )
            .route("/documents/{collection}/{id}", web::get().to(get_document))
            .route(
                "/documents/{collection}/{id}",
                web::patch().to(patch_document),
            )
            .route(
                "/documents/{collection}/{id}",
                web::delete().to(delete_document),
            )
    })
    .listen(listener)
    .unwrap()
    .workers(1)
    .run();
    actix_web::rt::spawn(server);

    (format!("http://{}/documents", addr), state)
}

/// Convenience: JSON object literal as a host map.
pub fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": { "code": 404, "status": "NOT_FOUND" }
    }))
}

async fn get_document(
    path: web::Path<(String, String)>,
    state: web::Data<EmulatorState>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    if id == "boom500" {
        return HttpResponse::InternalServerError().json(json!({
            "error": { "code": 500, "status": "INTERNAL" }
        }));
    }

    let key = format!("{}/{}", collection, id);
    *state.get_hits.lock().unwrap().entry(key.clone()).or_insert(0) += 1;

    match state.documents.lock().unwrap().get(&key) {
        Some(doc) => HttpResponse::Ok().json(doc),
        None => not_found(),
    }
}

async fn patch_document(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
    state: web::Data<EmulatorState>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    let key = format!("{}/{}", collection, id);

    let mask: Vec<String> = req
        .query_string()
        .split('&')
        .filter_map(|pair| pair.strip_prefix("updateMask.fieldPaths="))
        .map(|field| field.to_string())
        .collect();
    *state.last_update_mask.lock().unwrap() = if mask.is_empty() {
        None
    } else {
        Some(mask.clone())
    };

    let incoming = body.into_inner();
    let mut documents = state.documents.lock().unwrap();
    if mask.is_empty() {
        documents.insert(key.clone(), incoming);
    } else {
        // Masked update: only the listed fields change.
        let mut doc = documents
            .remove(&key)
            .unwrap_or_else(|| json!({ "fields": {} }));
        for field in &mask {
            if let Some(value) = incoming["fields"].get(field) {
                doc["fields"][field] = value.clone();
            }
        }
        documents.insert(key.clone(), doc);
    }

    let doc = documents.get(&key).cloned().unwrap_or_default();
    HttpResponse::Ok().json(doc)
}

async fn delete_document(
    path: web::Path<(String, String)>,
    state: web::Data<EmulatorState>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    let key = format!("{}/{}", collection, id);
    state.documents.lock().unwrap().remove(&key);
    HttpResponse::Ok().json(json!({}))
}

async fn list_collection(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    state: web::Data<EmulatorState>,
) -> HttpResponse {
    let collection = path.into_inner();
    let page_size: usize = query
        .get("pageSize")
        .and_then(|v| v.parse().ok())
        .unwrap_or(100);

    let prefix = format!("{}/", collection);
    let documents = state.documents.lock().unwrap();
    let mut keys: Vec<&String> = documents.keys().filter(|k| k.starts_with(&prefix)).collect();
    keys.sort();

    let page: Vec<Value> = keys
        .into_iter()
        .take(page_size)
        .filter_map(|k| documents.get(k).cloned())
        .collect();
    HttpResponse::Ok().json(json!({ "documents": page }))
}

async fn get_subcollection(
    path: web::Path<(String, String, String)>,
    state: web::Data<EmulatorState>,
) -> HttpResponse {
    let (collection, id, subcollection) = path.into_inner();
    let prefix = format!("{}/{}/{}/", collection, id, subcollection);

    let documents = state.documents.lock().unwrap();
    let mut keys: Vec<&String> = documents.keys().filter(|k| k.starts_with(&prefix)).collect();
    keys.sort();

    let nested: Vec<Value> = keys
        .into_iter()
        .filter_map(|k| documents.get(k).cloned())
        .collect();
    HttpResponse::Ok().json(json!({ "documents": nested }))
}

async fn run_query(body: web::Json<Value>, state: web::Data<EmulatorState>) -> HttpResponse {
    let query = &body["structuredQuery"];
    let collection = query["from"][0]["collectionId"].as_str().unwrap_or_default();

    let filters: Vec<&Value> = if let Some(composite) = query["where"].get("compositeFilter") {
        composite["filters"].as_array().map(|f| f.iter().collect()).unwrap_or_default()
    } else if query["where"].get("fieldFilter").is_some() {
        vec![&query["where"]]
    } else {
        Vec::new()
    };

    let prefix = format!("{}/", collection);
    let documents = state.documents.lock().unwrap();
    let mut keys: Vec<&String> = documents.keys().filter(|k| k.starts_with(&prefix)).collect();
    keys.sort();

    let mut results = Vec::new();
    for key in keys {
        let doc = &documents[key];
        let decoded = match decode_document(doc) {
            Some(decoded) => decoded,
            None => continue,
        };
        if filters.iter().all(|f| filter_matches(f, &decoded)) {
            results.push(json!({ "document": doc }));
        }
    }
    // Firestore appends read-time-only items; clients must skip them.
    results.push(json!({ "readTime": "2024-01-01T00:00:00Z" }));

    HttpResponse::Ok().json(Value::Array(results))
}

fn filter_matches(filter: &Value, doc: &Map<String, Value>) -> bool {
    let field_filter = &filter["fieldFilter"];
    let field = field_filter["field"]["fieldPath"].as_str().unwrap_or_default();
    let op = field_filter["op"].as_str().unwrap_or_default();
    let expected = decode_value(&field_filter["value"]);

    match op {
        "EQUAL" => doc.get(field) == Some(&expected),
        "ARRAY_CONTAINS" => doc
            .get(field)
            .and_then(Value::as_array)
            .map(|items| items.contains(&expected))
            .unwrap_or(false),
        _ => false,
    }
}
