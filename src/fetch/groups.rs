// src/fetch/groups.rs

use tracing::{info, instrument};

use super::CensusClient;
use crate::error::Result;

impl CensusClient {
    /// Fetch `groups.json` for the configured dataset, returned verbatim.
    #[instrument(level = "info", skip(self))]
    pub async fn get_variable_groups(&self) -> Result<String> {
        let url = self.config.groups_url()?;
        info!(url = %url, "fetching variable groups");
        self.get_text(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CensusError;
    use crate::fetch::testutil::serve;
    use axum::{http::StatusCode, routing::get, Router};

    const GROUPS: &str = r#"{"groups":[{"name":"B01001","description":"SEX BY AGE"}]}"#;

    #[tokio::test]
    async fn groups_body_is_passed_through() {
        let app = Router::new().route("/2022/acs/acs5/groups.json", get(|| async { GROUPS }));
        let client = CensusClient::anonymous(serve(app).await).unwrap();
        assert_eq!(client.get_variable_groups().await.unwrap(), GROUPS);
    }

    #[tokio::test]
    async fn missing_dataset_is_api_error() {
        let app = Router::new().route(
            "/2022/acs/acs5/groups.json",
            get(|| async { (StatusCode::NOT_FOUND, "unknown dataset") }),
        );
        let client = CensusClient::new("k", serve(app).await).unwrap();
        match client.get_variable_groups().await {
            Err(CensusError::Api { status, body }) => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(body, "unknown dataset");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
