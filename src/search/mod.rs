pub mod controller;
pub mod filters;
pub mod request;
pub mod table;

pub use controller::{OperationController, Phase, SaveOutcome, SearchOutcome, Skipped};
pub use filters::{parse_bound, Bound, FilterCriteria};
pub use request::{PermissiveBuilder, RequestBuilder, SearchRequest, StrictBuilder};
pub use table::{render_table, Column, ColumnKind, COLUMNS};
