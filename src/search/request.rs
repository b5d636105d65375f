use serde::Serialize;
use tracing::debug;

use super::filters::{Bound, FilterCriteria};
use crate::error::RequestError;

/// Snapshot of the filters as sent to the remote procedures.
///
/// Empty text fields become `None` (serialized as `null`). Text is not
/// trimmed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub min_bedrooms: Option<f64>,
    pub max_bedrooms: Option<f64>,
    pub min_bathrooms: Option<f64>,
    pub max_bathrooms: Option<f64>,
    pub min_sqft: Option<f64>,
    pub max_sqft: Option<f64>,
}

impl SearchRequest {
    pub fn bound(&self, bound: Bound) -> Option<f64> {
        match bound {
            Bound::MinBedrooms => self.min_bedrooms,
            Bound::MaxBedrooms => self.max_bedrooms,
            Bound::MinBathrooms => self.min_bathrooms,
            Bound::MaxBathrooms => self.max_bathrooms,
            Bound::MinSqft => self.min_sqft,
            Bound::MaxSqft => self.max_sqft,
        }
    }
}

/// Turns the live filters into a [`SearchRequest`].
///
/// Implementations must be deterministic: the same filters always give an
/// equal request.
pub trait RequestBuilder: Send + Sync {
    fn build(&self, filters: &FilterCriteria) -> Result<SearchRequest, RequestError>;
}

/// Passes numeric bounds through untouched, NaN included.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveBuilder;

impl RequestBuilder for PermissiveBuilder {
    fn build(&self, filters: &FilterCriteria) -> Result<SearchRequest, RequestError> {
        Ok(snapshot(filters))
    }
}

/// Refuses to build a request while any bound is not a finite number.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictBuilder;

impl RequestBuilder for StrictBuilder {
    fn build(&self, filters: &FilterCriteria) -> Result<SearchRequest, RequestError> {
        for bound in Bound::ALL {
            if let Some(value) = filters.bound(bound) {
                if !value.is_finite() {
                    return Err(RequestError::InvalidBound {
                        field: bound.name(),
                        value,
                    });
                }
            }
        }
        Ok(snapshot(filters))
    }
}

fn snapshot(filters: &FilterCriteria) -> SearchRequest {
    let request = SearchRequest {
        city: non_empty(filters.city()),
        state: non_empty(filters.state()),
        zip: non_empty(filters.zip()),
        min_bedrooms: filters.bound(Bound::MinBedrooms),
        max_bedrooms: filters.bound(Bound::MaxBedrooms),
        min_bathrooms: filters.bound(Bound::MinBathrooms),
        max_bathrooms: filters.bound(Bound::MaxBathrooms),
        min_sqft: filters.bound(Bound::MinSqft),
        max_sqft: filters.bound(Bound::MaxSqft),
    };
    debug!(?request, "Built search request");
    request
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn austin() -> FilterCriteria {
        let mut filters = FilterCriteria::new();
        filters.set_city("Austin");
        filters.set_state("tx");
        filters.set_bound(Bound::MinBedrooms, Some("3"));
        filters
    }

    #[test]
    fn empty_text_becomes_absent() {
        let request = PermissiveBuilder.build(&austin()).unwrap();
        assert_eq!(request.city.as_deref(), Some("Austin"));
        assert_eq!(request.state.as_deref(), Some("TX"));
        assert_eq!(request.zip, None);
    }

    #[test]
    fn text_is_not_trimmed() {
        let mut filters = austin();
        filters.set_zip(" 78701 ");
        let request = PermissiveBuilder.build(&filters).unwrap();
        assert_eq!(request.zip.as_deref(), Some(" 78701 "));
    }

    #[test]
    fn building_twice_gives_equal_requests() {
        let filters = austin();
        let first = PermissiveBuilder.build(&filters).unwrap();
        let second = PermissiveBuilder.build(&filters).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_with_wire_names() {
        let request = PermissiveBuilder.build(&austin()).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "city": "Austin",
                "state": "TX",
                "zip": null,
                "minBedrooms": 3.0,
                "maxBedrooms": null,
                "minBathrooms": null,
                "maxBathrooms": null,
                "minSqft": null,
                "maxSqft": null
            })
        );
    }

    #[test]
    fn permissive_forwards_nan() {
        let mut filters = austin();
        filters.set_bound(Bound::MaxSqft, Some("lots"));
        let request = PermissiveBuilder.build(&filters).unwrap();
        assert!(request.max_sqft.unwrap().is_nan());
    }

    #[test]
    fn strict_rejects_nan() {
        let mut filters = austin();
        filters.set_bound(Bound::MaxSqft, Some("lots"));
        let err = StrictBuilder.build(&filters).unwrap_err();
        assert!(matches!(
            err,
            RequestError::InvalidBound {
                field: "maxSqft",
                ..
            }
        ));
        assert_eq!(err.to_string(), "maxSqft is not a valid number");
    }

    #[test]
    fn strict_accepts_finite_bounds() {
        let strict = StrictBuilder.build(&austin()).unwrap();
        let permissive = PermissiveBuilder.build(&austin()).unwrap();
        assert_eq!(strict, permissive);
    }
}
