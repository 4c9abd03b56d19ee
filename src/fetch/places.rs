// src/fetch/places.rs

use serde_json::Value;
use tracing::{info, instrument};

use super::CensusClient;
use crate::error::{CensusError, MalformedResponse, Result};
use crate::fips::StateFips;
use crate::table::PlaceTable;

/// Geography selector: every place in the state.
const FOR_ALL_PLACES: &str = "place:*";

impl CensusClient {
    /// Fetch `NAME` plus `variables` for every place in `state`.
    ///
    /// The returned table's columns start with `NAME` followed by `variables` in order.
    /// The API may append geography columns (`state`, `place`) after them; those are kept.
    #[instrument(level = "info", skip(self, state, variables), fields(state = %state, vars = variables.len()))]
    pub async fn get_place_data(
        &self,
        state: &StateFips,
        variables: &[String],
    ) -> Result<PlaceTable> {
        if variables.is_empty() {
            return Err(CensusError::EmptyVariables);
        }
        let key = self.key()?;

        let mut url = self.config.dataset_url()?;
        url.query_pairs_mut()
            .append_pair("get", &format!("NAME,{}", variables.join(",")))
            .append_pair("for", FOR_ALL_PLACES)
            .append_pair("in", &format!("state:{}", state));
        info!(url = %url, "querying places");
        url.query_pairs_mut().append_pair("key", key);

        let body = self.get_text(url).await?;
        let table = parse_table(&body, variables)?;
        info!(rows = table.len(), columns = table.columns().len(), "places fetched");
        Ok(table)
    }
}

/// Reshape the API's array-of-arrays body (row 0 = header) into a [`PlaceTable`].
///
/// JSON `null` cells become empty strings and numbers keep their textual form;
/// anything else that is not a string is rejected.
pub fn parse_table(body: &str, variables: &[String]) -> Result<PlaceTable> {
    if body.trim().is_empty() {
        return Err(MalformedResponse::EmptyBody.into());
    }

    let raw: Vec<Vec<Value>> = serde_json::from_str(body)
        .map_err(|e| MalformedResponse::NotATable(e.to_string()))?;
    let mut rows = raw
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect::<Result<Vec<_>>>());

    let header = rows.next().ok_or(MalformedResponse::MissingHeader)??;

    let expected: Vec<String> = std::iter::once("NAME".to_string())
        .chain(variables.iter().cloned())
        .collect();
    if !header.starts_with(&expected) {
        return Err(MalformedResponse::UnexpectedHeader {
            expected,
            found: header,
        }
        .into());
    }

    let mut data = Vec::new();
    for (i, row) in rows.enumerate() {
        let row = row?;
        if row.len() != header.len() {
            return Err(MalformedResponse::RaggedRow {
                row: i + 1,
                expected: header.len(),
                found: row.len(),
            }
            .into());
        }
        data.push(row);
    }

    Ok(PlaceTable::new(header, data))
}

fn cell_text(v: Value) -> Result<String> {
    match v {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(MalformedResponse::NotATable(format!("unexpected cell {}", other)).into()),
    }
}
