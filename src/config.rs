//! Command-line configuration.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::remote::BackendConfig;
use crate::search::{Bound, FilterCriteria};

#[derive(Parser, Debug)]
#[command(
    name = "property-scout",
    version,
    about = "Search properties and save the results through a remote backend."
)]
pub struct Cli {
    /// Base URL of the search/save procedures
    #[arg(
        long,
        env = "PROPERTY_SCOUT_ENDPOINT",
        default_value = "http://localhost:8080/api/property"
    )]
    pub endpoint: String,

    /// HTTP timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Use the built-in fixture listings instead of the HTTP backend
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub zip: Option<String>,

    #[arg(long)]
    pub min_bedrooms: Option<String>,

    #[arg(long)]
    pub max_bedrooms: Option<String>,

    #[arg(long)]
    pub min_bathrooms: Option<String>,

    #[arg(long)]
    pub max_bathrooms: Option<String>,

    #[arg(long)]
    pub min_sqft: Option<String>,

    #[arg(long)]
    pub max_sqft: Option<String>,

    /// Reject non-numeric bounds instead of forwarding them
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Save the results after a successful search
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Write the request and rows to this JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            endpoint: self.endpoint.clone(),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }

    /// Feed the raw flag values through the same setters a form would use.
    pub fn apply_filters(&self, filters: &mut FilterCriteria) {
        if let Some(city) = &self.city {
            filters.set_city(city.as_str());
        }
        if let Some(state) = &self.state {
            filters.set_state(state);
        }
        if let Some(zip) = &self.zip {
            filters.set_zip(zip.as_str());
        }

        let bounds = [
            (Bound::MinBedrooms, &self.min_bedrooms),
            (Bound::MaxBedrooms, &self.max_bedrooms),
            (Bound::MinBathrooms, &self.min_bathrooms),
            (Bound::MaxBathrooms, &self.max_bathrooms),
            (Bound::MinSqft, &self.min_sqft),
            (Bound::MaxSqft, &self.max_sqft),
        ];
        for (bound, raw) in bounds {
            filters.set_bound(bound, raw.as_deref());
        }
    }
}
