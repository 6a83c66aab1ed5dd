//! Domain convenience queries over the Firestore gateway.

use serde_json::{Map, Value};

use crate::firestore::{FieldFilter, FirestoreClient};

const BANNER_LIMIT: usize = 10;

/// Jobs currently open for applications.
pub async fn available_jobs(client: &FirestoreClient) -> Vec<Map<String, Value>> {
    client
        .query_with_filters("app_jobs", &[FieldFilter::equal("is_avail", true)])
        .await
}

/// Look up a single gig by its mirrored record id.
pub async fn find_gig(client: &FirestoreClient, gig_id: &str) -> Option<Map<String, Value>> {
    client
        .query_with_filters("app_jobs", &[FieldFilter::equal("id", gig_id)])
        .await
        .into_iter()
        .next()
}

/// Active banners whose `state_list` includes the given state, capped at
/// ten. The state membership check happens client-side over the active set.
pub async fn banners_by_state(client: &FirestoreClient, state: &str) -> Vec<Map<String, Value>> {
    let active = client
        .query_with_filters("dealweeks", &[FieldFilter::equal("display", true)])
        .await;

    active
        .into_iter()
        .filter(|banner| banner_matches_state(banner, state))
        .take(BANNER_LIMIT)
        .collect()
}

fn banner_matches_state(banner: &Map<String, Value>, state: &str) -> bool {
    banner
        .get("state_list")
        .and_then(Value::as_array)
        .map(|states| states.iter().any(|s| s.as_str() == Some(state)))
        .unwrap_or(false)
}

/// Verified restaurants in a state.
pub async fn verified_restaurants_by_state(
    client: &FirestoreClient,
    state: &str,
    limit: usize,
) -> Vec<Map<String, Value>> {
    let mut restaurants = client
        .query_with_filters(
            "restaurants",
            &[
                FieldFilter::equal("restoState", state),
                FieldFilter::equal("is_verified", true),
            ],
        )
        .await;
    restaurants.truncate(limit);
    restaurants
}

/// Verified stores in a state.
pub async fn verified_stores_by_state(
    client: &FirestoreClient,
    state: &str,
    limit: usize,
) -> Vec<Map<String, Value>> {
    let mut stores = client
        .query_with_filters(
            "stores",
            &[
                FieldFilter::equal("state", state),
                FieldFilter::equal("is_verified", true),
            ],
        )
        .await;
    stores.truncate(limit);
    stores
}
