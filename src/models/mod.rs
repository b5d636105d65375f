use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::search::SearchRequest;

/// A single property returned by the search procedure.
///
/// The row is kept exactly as the backend sent it, field order and number
/// representation included, so it can be handed back to the save procedure
/// untouched. Display code reads fields through the accessors below.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ResultRow(Map<String, Value>);

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for fixtures and tests.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of `field`, if it is a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Numeric value of `field`. Numeric strings count; anything else is `None`.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.0.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ResultRow {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Response of the search procedure. `rows` may be missing when nothing matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    #[serde(default)]
    pub rows: Option<Vec<ResultRow>>,
}

impl SearchResponse {
    pub fn with_rows(rows: Vec<ResultRow>) -> Self {
        Self { rows: Some(rows) }
    }

    /// Rows of the response, empty when the backend sent none.
    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows.unwrap_or_default()
    }
}

/// Summary returned by the save procedure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveResult {
    pub search_id: String,
    pub properties_inserted: u64,
    pub properties_updated: u64,
    pub mortgages_upserted: u64,
}

/// What was searched and what came back, as written to disk by the CLI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnapshot {
    pub request: SearchRequest,
    pub rows: Vec<ResultRow>,
    pub searched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_round_trips_byte_for_byte() {
        let raw = r#"{"street":"1 Congress Ave","yearBuilt":1998.0,"livingSqft":1850,"lienCount":"2","propertyId":"bd-42","bedrooms":null}"#;
        let row: ResultRow = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&row).unwrap(), raw);
    }

    #[test]
    fn accessors_read_loosely_typed_fields() {
        let row: ResultRow = serde_json::from_value(json!({
            "street": "1 Congress Ave",
            "yearBuilt": 1998.0,
            "lienCount": "2",
            "bathrooms": "n/a",
            "zip": 78701
        }))
        .unwrap();
        assert_eq!(row.text("street"), Some("1 Congress Ave"));
        assert_eq!(row.number("yearBuilt"), Some(1998.0));
        assert_eq!(row.number("lienCount"), Some(2.0));
        assert_eq!(row.number("bathrooms"), None);
        assert_eq!(row.text("zip"), None);
        assert_eq!(row.get("zip"), Some(&json!(78701)));
        assert_eq!(row.number("missing"), None);
    }

    #[test]
    fn response_tolerates_mixed_row_shapes() {
        let resp: SearchResponse = serde_json::from_value(json!({
            "rows": [
                {"street": "A", "yearBuilt": 1998.0},
                {"street": "B", "lienCount": "none", "extra": {"nested": true}}
            ]
        }))
        .unwrap();
        assert_eq!(resp.into_rows().len(), 2);
    }

    #[test]
    fn response_without_rows_is_empty() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_rows().is_empty());

        let resp: SearchResponse = serde_json::from_str(r#"{"rows": null}"#).unwrap();
        assert!(resp.into_rows().is_empty());
    }

    #[test]
    fn save_result_uses_camel_case() {
        let result: SaveResult = serde_json::from_value(json!({
            "searchId": "S1",
            "propertiesInserted": 1,
            "propertiesUpdated": 0,
            "mortgagesUpserted": 1
        }))
        .unwrap();
        assert_eq!(result.search_id, "S1");
        assert_eq!(result.mortgages_upserted, 1);
    }
}
