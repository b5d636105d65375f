pub mod fixture;
pub mod http;
pub mod mock;
pub mod traits;

pub use fixture::FixtureBackend;
pub use http::{BackendConfig, HttpBackend};
pub use traits::{SaveService, SearchService};
