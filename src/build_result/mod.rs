//! DBB build-result model and record classification
//!
//! A build result is the JSON report the DBB build engine writes after a
//! build. Only a subset of its records describe deployable outputs; the
//! classifier here selects them. Classification is a pure predicate plus an
//! extractor - records are never mutated, and a structurally malformed record
//! is simply non-deployable rather than an error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Record types that can carry deployable outputs.
const DEPLOYABLE_RECORD_TYPES: &[&str] = &["EXECUTE", "COPY_TO_PDS"];

/// Top-level DBB build result document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildResult {
    #[serde(default, deserialize_with = "tolerant_records")]
    pub records: Vec<Record>,
}

/// One record of a build result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub outputs: Vec<Output>,
    #[serde(rename = "deletedBuildOutputs", skip_serializing_if = "Option::is_none")]
    pub deleted_build_outputs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One build output within a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    #[serde(rename = "deployType", skip_serializing_if = "Option::is_none")]
    pub deploy_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
}

/// The deployable view of a record: its dataset and deploy type, taken from
/// the first qualifying output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployableRecord {
    pub dataset: String,
    pub deploy_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildResultError {
    #[error("couldn't read build result file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse build result file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Record {
    /// True when this record represents a deployable build output.
    pub fn is_deployable(&self) -> bool {
        self.deployable_output().is_some()
    }

    /// True when the record flags deleted build outputs.
    pub fn is_deleted(&self) -> bool {
        self.deleted_build_outputs.as_ref().is_some_and(truthy)
    }

    /// The dataset/deployType pair of the first qualifying output, if any.
    pub fn extract(&self) -> Option<DeployableRecord> {
        self.deployable_output().map(|output| DeployableRecord {
            // deployable_output only yields outputs with both fields present
            dataset: output.dataset.clone().unwrap_or_default(),
            deploy_type: output.deploy_type.clone().unwrap_or_default(),
        })
    }

    /// First output carrying a non-empty deployType and a dataset, provided
    /// the record type is one that produces deployable outputs.
    fn deployable_output(&self) -> Option<&Output> {
        let record_type = self.record_type.as_deref()?;
        if !DEPLOYABLE_RECORD_TYPES.contains(&record_type) {
            return None;
        }
        self.outputs.iter().find(|output| {
            output.deploy_type.as_deref().is_some_and(|d| !d.is_empty())
                && output.dataset.is_some()
        })
    }
}

impl BuildResult {
    /// Load a build result from a JSON file.
    ///
    /// An unreadable file or a document that is not a build result at all is
    /// fatal; individual records that don't fit the record shape come back as
    /// empty (non-deployable) records.
    pub fn from_file(path: &Path) -> Result<Self, BuildResultError> {
        let raw = fs::read_to_string(path).map_err(|source| BuildResultError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| BuildResultError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// All deployable records, in build-result order.
    pub fn deployable_records(&self) -> Vec<DeployableRecord> {
        self.records.iter().filter_map(Record::extract).collect()
    }

    /// The build-report link: the first record carrying a non-empty url.
    pub fn build_report_url(&self) -> Option<&str> {
        self.records
            .iter()
            .filter_map(|record| record.url.as_deref())
            .find(|url| !url.is_empty())
    }
}

/// JSON truthiness matching the upstream report conventions: null, false, 0,
/// and empty strings/arrays/objects are falsy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Deserialize records element-tolerantly: a record that doesn't fit the
/// Record shape becomes an empty record, which classifies as non-deployable.
fn tolerant_records<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or_default())
        .collect())
}
