use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::error::RemoteError;
use crate::models::{ResultRow, SaveResult, SearchResponse};
use crate::remote::traits::{SaveService, SearchService};
use crate::search::{Bound, SearchRequest};

/// Offline backend serving a fixed set of Texas listings.
///
/// Matching mimics the real procedure closely enough for demos: location by
/// zip or by city and state, then whichever finite bounds are set.
pub struct FixtureBackend {
    listings: Vec<ResultRow>,
}

impl FixtureBackend {
    pub fn new() -> Self {
        Self {
            listings: fixture_listings(),
        }
    }

    fn matches(request: &SearchRequest, row: &ResultRow) -> bool {
        let location = match (&request.zip, &request.city, &request.state) {
            (Some(zip), _, _) if !zip.trim().is_empty() => {
                row.text("zip") == Some(zip.trim())
            }
            (_, Some(city), Some(state)) => {
                eq_ignore_case(row.text("city"), city) && eq_ignore_case(row.text("state"), state)
            }
            _ => false,
        };

        location
            && within(row.number("bedrooms"), request.bound(Bound::MinBedrooms), request.bound(Bound::MaxBedrooms))
            && within(row.number("bathrooms"), request.bound(Bound::MinBathrooms), request.bound(Bound::MaxBathrooms))
            && within(row.number("livingSqft"), request.bound(Bound::MinSqft), request.bound(Bound::MaxSqft))
    }
}

impl Default for FixtureBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn eq_ignore_case(value: Option<&str>, wanted: &str) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case(wanted.trim()))
}

fn within(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    let Some(value) = value else {
        return true;
    };
    let above = min.filter(|m| m.is_finite()).map_or(true, |m| value >= m);
    let below = max.filter(|m| m.is_finite()).map_or(true, |m| value <= m);
    above && below
}

#[async_trait]
impl SearchService for FixtureBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, RemoteError> {
        let rows: Vec<ResultRow> = self
            .listings
            .iter()
            .filter(|row| Self::matches(request, row))
            .cloned()
            .collect();
        info!("Fixture search matched {} listings", rows.len());
        Ok(SearchResponse::with_rows(rows))
    }

    fn backend_name(&self) -> &'static str {
        "fixture"
    }
}

#[async_trait]
impl SaveService for FixtureBackend {
    async fn save_results(
        &self,
        _request: &SearchRequest,
        rows: &[ResultRow],
    ) -> Result<SaveResult, RemoteError> {
        let mortgages = rows
            .iter()
            .filter_map(|row| row.number("lienCount"))
            .map(|liens| liens as u64)
            .sum();
        Ok(SaveResult {
            search_id: format!("fixture-{}", Utc::now().format("%Y%m%d%H%M%S")),
            properties_inserted: rows.len() as u64,
            properties_updated: 0,
            mortgages_upserted: mortgages,
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    street: &str,
    city: &str,
    zip: &str,
    beds: f64,
    baths: f64,
    sqft: f64,
    year: i32,
    value: f64,
    liens: u32,
) -> ResultRow {
    ResultRow::new()
        .with("propertyId", id)
        .with("street", street)
        .with("city", city)
        .with("state", "TX")
        .with("zip", zip)
        .with("bedrooms", beds)
        .with("bathrooms", baths)
        .with("livingSqft", sqft)
        .with("yearBuilt", year)
        .with("lotSizeSqft", sqft * 3.5)
        .with("estimatedValue", value)
        .with("lastSalePrice", value * 0.82)
        .with("lienCount", liens)
        .with(
            "totalOpenLienBalance",
            if liens == 0 { 0.0 } else { value * 0.55 },
        )
        .with("fixture", json!(true))
}

fn fixture_listings() -> Vec<ResultRow> {
    vec![
        listing("fx-1", "1100 Congress Ave", "Austin", "78701", 3.0, 2.0, 1850.0, 1998, 615_000.0, 1),
        listing("fx-2", "4502 Avenue H", "Austin", "78751", 2.0, 1.0, 1120.0, 1939, 489_000.0, 0),
        listing("fx-3", "7811 Shoal Creek Blvd", "Austin", "78757", 4.0, 3.0, 2640.0, 1972, 845_000.0, 2),
        listing("fx-4", "2210 Greenville Ave", "Dallas", "75206", 3.0, 2.5, 2015.0, 2004, 572_500.0, 1),
        listing("fx-5", "918 Heights Blvd", "Houston", "77008", 5.0, 4.0, 3380.0, 2016, 1_125_000.0, 1),
    ]
}
