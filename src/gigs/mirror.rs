//! Mirror payload for the `app_jobs` document collection.
//!
//! The relational record and the mirrored document are kept
//! eventually-consistent by an explicit dual write; this module only builds
//! the document body.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use super::model::GigRecord;

/// Lowercase, hyphenate non-alphanumerics, collapse runs, trim ends.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_hyphen = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Salary display string: `$min - $max`, `$min`, or empty. A zero price
/// counts as absent, same as the submission form leaving it blank.
fn salary_display(min_price: Option<f64>, max_price: Option<f64>) -> String {
    let min = min_price.filter(|p| *p != 0.0);
    let max = max_price.filter(|p| *p != 0.0);
    match (min, max) {
        (Some(min), Some(max)) => format!("${:.2} - ${:.2}", min, max),
        (Some(min), None) => format!("${:.2}", min),
        _ => String::new(),
    }
}

/// Build the `app_jobs` mirror document for a stored gig record.
pub fn job_document(gig: &GigRecord, zip: &str) -> Map<String, Value> {
    job_document_at(gig, zip, Utc::now())
}

/// As [`job_document`], with an explicit slug timestamp.
pub fn job_document_at(gig: &GigRecord, zip: &str, now: DateTime<Utc>) -> Map<String, Value> {
    let now_str = now.format("%Y%m%d%H%M%S").to_string();
    let job_slug = if gig.title.is_empty() {
        now_str
    } else {
        format!("{}-{}", slugify(&gig.title), now_str)
    };

    let created_on: Value = gig
        .posted_at
        .map(|t| Value::String(t.to_rfc3339()))
        .unwrap_or(Value::Null);
    let end_time: Value = gig
        .deadline
        .map(|d| Value::String(d.format("%Y-%m-%dT00:00:00").to_string()))
        .unwrap_or(Value::Null);

    let document = json!({
        "bizID": "",
        "bizName": gig.full_name,
        "city": gig.gig_city,
        "content": gig.description,
        "created_on": created_on,
        "end_time": end_time,
        "has_link": false,
        "id": gig.id,
        "is_avail": true,
        "is_paid": true,
        "jobSlug": job_slug,
        "job_link": "",
        "posImg": "_posImg",
        "pos_cos": 0,
        "pos_duration": "as long as",
        "position": gig.gig_category,
        "post_by": gig.full_name,
        "salary": salary_display(gig.min_price, gig.max_price),
        "state": gig.gig_state,
        "title": gig.title,
        "zip": zip,
        "job_category": {
            "app": false,
            "banmgig": false,
        },
        "gig_creation": {
            "title": gig.title,
            "full_name": gig.full_name,
            "phone_number": gig.phone_number,
            "email": gig.email,
            "deadline": gig.deadline.map(|d| d.format("%Y-%m-%d").to_string()),
            "time": gig.time.map(|t| t.format("%H:%M:%S").to_string()),
            "min_price": gig.min_price,
            "max_price": gig.max_price,
            "description": gig.description,
            "gig_category": gig.gig_category,
            "gig_review": gig.gig_review,
            "gig_comment": gig.gig_comment,
            "gig_kreyate_id": gig.gig_kreyate_id,
            "gig_kreyate_name": gig.gig_kreyate_name,
            "gig_kreyate_review": gig.gig_kreyate_review,
            "gig_city": gig.gig_city,
            "gig_state": gig.gig_state,
            "gig_country": gig.gig_country,
            "kreyate_city": gig.kreyate_city,
            "kreyate_state": gig.kreyate_state,
            "kreyate_country": gig.kreyate_country,
            "kreyate_fee": gig.kreyate_fee,
            "gig_kreyate_fee": gig.gig_kreyate_fee,
            "amount_paid": gig.amount_paid,
            "currency": gig.currency,
            "method_payment": gig.method_payment,
            "kreyate_phone": gig.kreyate_phone,
            "offers": gig.offers,
        }
    });

    document.as_object().cloned().unwrap_or_default()
}
