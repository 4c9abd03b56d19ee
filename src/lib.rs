//! Fetch American Community Survey place-level estimates for one state and
//! export them as CSV.
//!
//! ```no_run
//! use acsplaces::{lookup_state, ApiConfig, CensusClient, ColumnRenameMap};
//!
//! # async fn run() -> acsplaces::Result<()> {
//! let client = CensusClient::new("my-key", ApiConfig::default())?;
//! let state = lookup_state("CALIFORNIA")?;
//! let mut table = client
//!     .get_place_data(&state, &["B01001_001E".to_string()])
//!     .await?;
//! let rename: ColumnRenameMap =
//!     [("B01001_001E".to_string(), "total_population".to_string())].into();
//! table.rename_columns(&rename);
//! table.write_csv("california_demographics.csv")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod fips;
pub mod table;

pub use config::{ApiConfig, ColumnRenameMap, ExportConfig, VariableSpec};
pub use error::{CensusError, MalformedResponse, Result};
pub use export::export_places;
pub use fetch::CensusClient;
pub use fips::{lookup_state, resolve_state, state_name, StateFips};
pub use table::PlaceTable;
