//! Copy-mode resolution
//!
//! Deploy-type tags are free-form strings from the build engine, so the
//! transfer mode is derived by ordered case-insensitive substring matching
//! (accommodating variants like "DBRMLIB"), with an optional YAML override
//! table whose exact-key entries take absolute precedence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Transfer semantics for one build output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CopyMode {
    /// Binary load image; copied with load-module attributes preserved.
    Load,
    /// Generic binary content.
    Binary,
    /// Text content (default).
    Text,
}

/// Substring rules applied in order; first match wins.
const COPY_MODE_RULES: &[(&str, CopyMode)] = &[
    ("LOAD", CopyMode::Load),
    ("DBRM", CopyMode::Binary),
    ("TEXT", CopyMode::Text),
    ("COPY", CopyMode::Text),
    ("OBJ", CopyMode::Binary),
    ("DDL", CopyMode::Text),
    ("JCL", CopyMode::Text),
];

/// External deployType -> copy-mode overrides, loaded from a YAML mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CopyModeTable(BTreeMap<String, CopyMode>);

#[derive(Debug, thiserror::Error)]
pub enum CopyModeError {
    #[error("couldn't open copy mode properties file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse copy mode properties file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl CopyModeTable {
    /// Load an override table. Failure here is a configuration error and is
    /// fatal to the whole run.
    pub fn from_file(path: &Path) -> Result<Self, CopyModeError> {
        let raw = fs::read_to_string(path).map_err(|source| CopyModeError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| CopyModeError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn get(&self, deploy_type: &str) -> Option<CopyMode> {
        self.0.get(deploy_type).copied()
    }
}

impl<const N: usize> From<[(&str, CopyMode); N]> for CopyModeTable {
    fn from(entries: [(&str, CopyMode); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}

/// Resolve the transfer mode for a deploy type.
///
/// An exact-key entry in the override table wins verbatim; otherwise the
/// built-in substring rules apply, defaulting to [`CopyMode::Text`].
pub fn resolve_copy_mode(deploy_type: &str, table: Option<&CopyModeTable>) -> CopyMode {
    if let Some(mode) = table.and_then(|t| t.get(deploy_type)) {
        return mode;
    }
    let upper = deploy_type.to_ascii_uppercase();
    for (needle, mode) in COPY_MODE_RULES {
        if upper.contains(needle) {
            return *mode;
        }
    }
    CopyMode::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_rules() {
        assert_eq!(resolve_copy_mode("LOAD", None), CopyMode::Load);
        assert_eq!(resolve_copy_mode("LOADMOD", None), CopyMode::Load);
        assert_eq!(resolve_copy_mode("DBRM", None), CopyMode::Binary);
        assert_eq!(resolve_copy_mode("DBRMLIB", None), CopyMode::Binary);
        assert_eq!(resolve_copy_mode("OBJDECK", None), CopyMode::Binary);
        assert_eq!(resolve_copy_mode("TEXT", None), CopyMode::Text);
        assert_eq!(resolve_copy_mode("COPY", None), CopyMode::Text);
        assert_eq!(resolve_copy_mode("DDL", None), CopyMode::Text);
        assert_eq!(resolve_copy_mode("JCL", None), CopyMode::Text);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(resolve_copy_mode("load", None), CopyMode::Load);
        assert_eq!(resolve_copy_mode("dbrmlib", None), CopyMode::Binary);
    }

    #[test]
    fn test_unknown_defaults_to_text() {
        assert_eq!(resolve_copy_mode("WHATEVER", None), CopyMode::Text);
        assert_eq!(resolve_copy_mode("", None), CopyMode::Text);
    }

    #[test]
    fn test_override_table_wins() {
        let table = CopyModeTable::from([("LOAD", CopyMode::Binary)]);
        assert_eq!(resolve_copy_mode("LOAD", Some(&table)), CopyMode::Binary);
        // Overrides are exact-key only; non-matching keys fall through.
        assert_eq!(resolve_copy_mode("LOADMOD", Some(&table)), CopyMode::Load);
    }

    #[test]
    fn test_table_from_yaml() {
        let table: CopyModeTable = serde_yaml::from_str("CICSLOAD: LOAD\nMAPCOPY: BINARY\n").unwrap();
        assert_eq!(table.get("CICSLOAD"), Some(CopyMode::Load));
        assert_eq!(table.get("MAPCOPY"), Some(CopyMode::Binary));
        assert_eq!(table.get("OTHER"), None);
    }

    #[test]
    fn test_invalid_table_value_is_parse_error() {
        let parsed: Result<CopyModeTable, _> = serde_yaml::from_str("CICSLOAD: SHINY\n");
        assert!(parsed.is_err());
    }
}
