//! Structured-query construction for the Firestore REST `:runQuery`
//! endpoint.
//!
//! Builders are transport-independent: they only produce the JSON body.
//! Operator names are an open set; an invalid operator is rejected by the
//! remote service, not here.

use serde_json::{json, Value};

use super::value::encode_value;

/// Filter operator, matching Firestore's operator names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOp {
    Equal,
    ArrayContains,
    /// Any other operator name, passed through verbatim.
    Custom(String),
}

impl FilterOp {
    pub fn as_str(&self) -> &str {
        match self {
            FilterOp::Equal => "EQUAL",
            FilterOp::ArrayContains => "ARRAY_CONTAINS",
            FilterOp::Custom(op) => op,
        }
    }
}

/// A single field filter, built fresh per query.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Equal, value)
    }

    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::ArrayContains, value)
    }

    pub fn custom(
        field: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(field, FilterOp::Custom(op.into()), value)
    }

    /// Wire form: `{"fieldFilter": {"field": {"fieldPath": ..}, "op": ..,
    /// "value": ..}}`.
    pub fn to_wire(&self) -> Value {
        json!({
            "fieldFilter": {
                "field": { "fieldPath": self.field },
                "op": self.op.as_str(),
                "value": encode_value(&self.value),
            }
        })
    }
}

/// Build a `structuredQuery` request body over a collection.
///
/// Exactly one filter produces a bare `fieldFilter` clause; the REST API
/// rejects a single-filter composite in some configurations, so the
/// count==1 special case must not be collapsed into the composite path.
/// Two or more filters are AND-composed in caller order. Limits are never
/// embedded in the body; callers truncate after decoding, which can
/// over-fetch but never under-fetches.
pub fn build_query(collection: &str, filters: &[FieldFilter]) -> Value {
    let mut structured = json!({
        "from": [{ "collectionId": collection }],
    });

    match filters {
        [] => {}
        [only] => {
            structured["where"] = only.to_wire();
        }
        many => {
            let clauses: Vec<Value> = many.iter().map(FieldFilter::to_wire).collect();
            structured["where"] = json!({
                "compositeFilter": { "op": "AND", "filters": clauses }
            });
        }
    }

    json!({ "structuredQuery": structured })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_filter_has_no_composite_wrapper() {
        let query = build_query("jobs", &[FieldFilter::equal("is_avail", true)]);
        let where_clause = &query["structuredQuery"]["where"];
        assert!(where_clause.get("fieldFilter").is_some());
        assert!(where_clause.get("compositeFilter").is_none());
        assert_eq!(where_clause["fieldFilter"]["field"]["fieldPath"], "is_avail");
        assert_eq!(where_clause["fieldFilter"]["op"], "EQUAL");
        assert_eq!(
            where_clause["fieldFilter"]["value"],
            json!({ "booleanValue": true })
        );
    }

    #[test]
    fn multiple_filters_compose_with_and_in_caller_order() {
        let query = build_query(
            "stores",
            &[
                FieldFilter::equal("state", "TX"),
                FieldFilter::equal("is_verified", true),
            ],
        );
        let composite = &query["structuredQuery"]["where"]["compositeFilter"];
        assert_eq!(composite["op"], "AND");
        let filters = composite["filters"].as_array().unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0]["fieldFilter"]["field"]["fieldPath"], "state");
        assert_eq!(
            filters[1]["fieldFilter"]["field"]["fieldPath"],
            "is_verified"
        );
    }

    #[test]
    fn no_filters_means_no_where_clause() {
        let query = build_query("jobs", &[]);
        assert!(query["structuredQuery"].get("where").is_none());
        assert_eq!(
            query["structuredQuery"]["from"],
            json!([{ "collectionId": "jobs" }])
        );
    }

    #[test]
    fn array_contains_uses_firestore_operator_name() {
        let filter = FieldFilter::array_contains("state_list", "CA");
        let wire = filter.to_wire();
        assert_eq!(wire["fieldFilter"]["op"], "ARRAY_CONTAINS");
        assert_eq!(
            wire["fieldFilter"]["value"],
            json!({ "stringValue": "CA" })
        );
    }

    #[test]
    fn custom_operators_pass_through_unvalidated() {
        let filter = FieldFilter::custom("count", "LESS_THAN", 5);
        assert_eq!(filter.to_wire()["fieldFilter"]["op"], "LESS_THAN");
    }
}
