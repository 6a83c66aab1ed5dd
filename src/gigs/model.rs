//! Gig submission record.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

const RECORD_ID_LEN: usize = 20;

/// Generate a 20-character alphanumeric record id, matching the id format
/// used by the mirrored document store.
pub fn generate_record_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RECORD_ID_LEN)
        .map(char::from)
        .collect()
}

/// A gig listing as submitted through the form and stored in the local
/// record store. The same record is mirrored into the `app_jobs` document
/// collection via [`crate::gigs::mirror::job_document`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GigRecord {
    /// Assigned on create; empty until then.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Assigned on create.
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub gig_category: String,
    #[serde(default)]
    pub gig_review: String,
    #[serde(default)]
    pub gig_comment: String,
    #[serde(default)]
    pub gig_kreyate_id: Option<i64>,
    #[serde(default)]
    pub gig_kreyate_name: String,
    #[serde(default)]
    pub gig_kreyate_review: String,
    #[serde(default)]
    pub gig_city: String,
    #[serde(default)]
    pub gig_state: String,
    #[serde(default)]
    pub gig_country: String,
    #[serde(default)]
    pub kreyate_city: String,
    #[serde(default)]
    pub kreyate_state: String,
    #[serde(default)]
    pub kreyate_country: String,
    #[serde(default)]
    pub kreyate_fee: Option<f64>,
    #[serde(default)]
    pub gig_kreyate_fee: Option<f64>,
    #[serde(default)]
    pub amount_paid: Option<f64>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub method_payment: String,
    #[serde(default)]
    pub kreyate_phone: String,
    #[serde(default)]
    pub offers: Vec<String>,
}

impl GigRecord {
    /// Minimal record for the given submitter, everything else defaulted.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            full_name: full_name.into(),
            phone_number: String::new(),
            email: String::new(),
            deadline: None,
            time: None,
            min_price: None,
            max_price: None,
            posted_at: None,
            description: String::new(),
            gig_category: String::new(),
            gig_review: String::new(),
            gig_comment: String::new(),
            gig_kreyate_id: None,
            gig_kreyate_name: String::new(),
            gig_kreyate_review: String::new(),
            gig_city: String::new(),
            gig_state: String::new(),
            gig_country: String::new(),
            kreyate_city: String::new(),
            kreyate_state: String::new(),
            kreyate_country: String::new(),
            kreyate_fee: None,
            gig_kreyate_fee: None,
            amount_paid: None,
            currency: String::new(),
            method_payment: String::new(),
            kreyate_phone: String::new(),
            offers: Vec::new(),
        }
    }
}
