// src/export.rs

use std::path::Path;
use tracing::{info, instrument};

use crate::config::ColumnRenameMap;
use crate::error::Result;
use crate::fetch::CensusClient;
use crate::fips::StateFips;
use crate::table::PlaceTable;

/// Fetch `variables` for every place in `state`, rename columns and write `output`.
/// Nothing is written unless the fetch succeeds.
#[instrument(level = "info", skip(client, state, variables, rename, output), fields(state = %state, output = %output.as_ref().display()))]
pub async fn export_places<P: AsRef<Path>>(
    client: &CensusClient,
    state: &StateFips,
    variables: &[String],
    rename: &ColumnRenameMap,
    output: P,
) -> Result<PlaceTable> {
    let mut table = client.get_place_data(state, variables).await?;
    let renamed = table.rename_columns(rename);
    table.write_csv(output.as_ref())?;
    info!(rows = table.len(), renamed, "export written");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CensusError;
    use crate::fetch::testutil::serve;
    use crate::fips::lookup_state;
    use axum::{http::StatusCode, routing::get, Router};
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn california_population_end_to_end() {
        let app = Router::new().route(
            "/2022/acs/acs5",
            get(|| async {
                r#"[["NAME","B01001_001E"],["Los Angeles city, California","3898747"]]"#
            }),
        );
        let client = CensusClient::new("k", serve(app).await).unwrap();
        let state = lookup_state("CALIFORNIA").unwrap();
        assert_eq!(state.as_str(), "06");

        let dir = tempdir().unwrap();
        let out = dir.path().join("california_demographics.csv");
        let rename: ColumnRenameMap =
            [("B01001_001E".to_string(), "total_population".to_string())]
                .into_iter()
                .collect();

        let table = export_places(
            &client,
            &state,
            &["B01001_001E".to_string()],
            &rename,
            &out,
        )
        .await
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.columns(), &["NAME", "total_population"]);

        let text = fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("NAME,total_population"));
        assert_eq!(
            lines.next(),
            Some("\"Los Angeles city, California\",3898747")
        );
        assert_eq!(lines.next(), None);

        let back = PlaceTable::read_csv(&out).unwrap();
        assert_eq!(
            back.rows(),
            &[vec!["Los Angeles city, California".to_string(), "3898747".to_string()]]
        );
    }

    #[tokio::test]
    async fn failed_fetch_writes_nothing() {
        let app = Router::new().route(
            "/2022/acs/acs5",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "backend down") }),
        );
        let client = CensusClient::new("k", serve(app).await).unwrap();
        let state = lookup_state("NEVADA").unwrap();

        let dir = tempdir().unwrap();
        let out = dir.path().join("nevada.csv");
        let err = export_places(
            &client,
            &state,
            &["B01001_001E".to_string()],
            &ColumnRenameMap::new(),
            &out,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CensusError::Api { .. }));
        assert!(!out.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
