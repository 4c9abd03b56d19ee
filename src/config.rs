// src/config.rs

use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::error::{CensusError, Result};

pub const DEFAULT_HOST: &str = "https://api.census.gov/data";
pub const DEFAULT_YEAR: &str = "2022";
pub const DEFAULT_DATASET: &str = "acs/acs5";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable consulted for the access key.
pub const API_KEY_ENV: &str = "CENSUS_API_KEY";

/// MeasureCode → descriptive column name.
pub type ColumnRenameMap = HashMap<String, String>;

/// Where and how long to query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub year: String,
    pub dataset: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            year: DEFAULT_YEAR.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// `{host}/{year}/{dataset}`
    pub fn dataset_url(&self) -> Result<Url> {
        let raw = format!(
            "{}/{}/{}",
            self.host.trim_end_matches('/'),
            self.year.trim_matches('/'),
            self.dataset.trim_matches('/')
        );
        Url::parse(&raw).map_err(|e| CensusError::Config(format!("bad API url {}: {}", raw, e)))
    }

    /// `{host}/{year}/{dataset}/groups.json`
    pub fn groups_url(&self) -> Result<Url> {
        let mut url = self.dataset_url()?;
        url.path_segments_mut()
            .map_err(|_| CensusError::Config(format!("API host {} cannot be a base", self.host)))?
            .push("groups.json");
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// One requested variable, optionally with the column name it is exported under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl VariableSpec {
    /// `CODE` or `CODE=name`
    pub fn parse(raw: &str) -> Result<Self> {
        let (code, name) = match raw.split_once('=') {
            Some((code, name)) => (code.trim(), Some(name.trim())),
            None => (raw.trim(), None),
        };
        if code.is_empty() {
            return Err(CensusError::Config(format!("empty variable code in {:?}", raw)));
        }
        Ok(Self {
            code: code.to_string(),
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
        })
    }
}

/// YAML export job, e.g.
///
/// ```yaml
/// api:
///   year: "2022"
/// state: CALIFORNIA
/// variables:
///   - code: B01001_001E
///     name: total_population
/// output: california_demographics.csv
/// ```
///
/// The access key is deliberately not a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub api: ApiConfig,
    pub state: Option<String>,
    pub variables: Vec<VariableSpec>,
    pub output: Option<PathBuf>,
}

impl ExportConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
            .map_err(|e| CensusError::Config(format!("parsing {}: {}", path.display(), e)))
    }

    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Variable codes in request order.
    pub fn codes(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.code.clone()).collect()
    }

    pub fn rename_map(&self) -> ColumnRenameMap {
        self.variables
            .iter()
            .filter_map(|v| v.name.as_ref().map(|n| (v.code.clone(), n.clone())))
            .collect()
    }
}

/// Resolve the access key: explicit value first, then the environment.
pub fn resolve_api_key(explicit: Option<String>) -> Result<String> {
    explicit
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            CensusError::Config(format!("no API key given (use --key or set {})", API_KEY_ENV))
        })
}
