//! Wazi Deploy manifest model
//!
//! The manifest is a YAML deployment descriptor listing artifacts and
//! metadata annotations. Only the fields this tool touches are modeled as
//! typed fields; everything else in the document is carried through
//! unchanged via flattened mappings so an update rewrites the manifest in
//! place without losing content.

mod update;

pub use update::{update_fingerprints, UpdateError};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Conventional manifest file name within a Wazi Deploy source folder.
pub const DEFAULT_MANIFEST_NAME: &str = "deployment-manifest.yml";

/// Manifest location used when no explicit path is given: the conventional
/// manifest name inside the source folder.
pub fn default_manifest_path(source_folder: &Path) -> std::path::PathBuf {
    source_folder.join(DEFAULT_MANIFEST_NAME)
}

/// A Wazi Deploy manifest document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub annotations: Mapping,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// One artifact entry in the manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub artifact_type: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A key/value artifact property. Keys are not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("couldn't read manifest file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse manifest file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("couldn't write manifest file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl Artifact {
    /// Value of the first property with the given key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Update the first `fingerprint` property in place, or append one.
    ///
    /// Duplicate fingerprint entries before the update are tolerated; only
    /// the first is effective.
    pub fn set_fingerprint(&mut self, fingerprint: &str) {
        match self.properties.iter_mut().find(|p| p.key == "fingerprint") {
            Some(prop) => prop.value = fingerprint.to_string(),
            None => self.properties.push(Property {
                key: "fingerprint".to_string(),
                value: fingerprint.to_string(),
            }),
        }
    }
}

impl Manifest {
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let raw = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ManifestError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Rewrite the manifest file in place.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ManifestError> {
        let raw = serde_yaml::to_string(self)?;
        fs::write(path, raw).map_err(|source| ManifestError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Set an annotation under `metadata.annotations`, overwriting any prior
    /// value for that key.
    pub fn set_annotation(&mut self, key: &str, value: Value) {
        self.metadata
            .annotations
            .insert(Value::String(key.to_string()), value);
    }
}
