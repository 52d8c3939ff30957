//! Qualified dataset name parsing
//!
//! DBB build outputs reference their location as `CONTAINER(MEMBER)` - a PDS
//! name with the member in parentheses - or as a bare sequential dataset name
//! with no member part.

use std::fmt;

/// A dataset reference split into its container and member parts.
///
/// `member` is empty for a bare (unparenthesized) dataset name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub container: String,
    pub member: String,
}

impl QualifiedName {
    /// The member name, or an error if the name had no member part.
    ///
    /// Staging and fingerprinting always expect the `CONTAINER(MEMBER)` form;
    /// a bare dataset name is malformed input for them.
    pub fn require_member(&self) -> Result<&str, DatasetError> {
        if self.member.is_empty() {
            Err(DatasetError::MissingMember {
                dataset: self.container.clone(),
            })
        } else {
            Ok(&self.member)
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.member.is_empty() {
            write!(f, "{}", self.container)
        } else {
            write!(f, "{}({})", self.container, self.member)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("malformed dataset name '{dataset}': unbalanced parentheses")]
    Malformed { dataset: String },

    #[error("dataset name '{dataset}' has no member part")]
    MissingMember { dataset: String },
}

/// Split a dataset reference on its parenthesis delimiters.
///
/// `PDS.NAME(MEMBER)` parses to `(PDS.NAME, MEMBER)`; a name without
/// parentheses parses to `(name, "")`. Anything else (unbalanced or nested
/// parentheses) is an error.
pub fn parse(dataset: &str) -> Result<QualifiedName, DatasetError> {
    let malformed = || DatasetError::Malformed {
        dataset: dataset.to_string(),
    };

    match dataset.split_once('(') {
        None => {
            if dataset.contains(')') {
                return Err(malformed());
            }
            Ok(QualifiedName {
                container: dataset.to_string(),
                member: String::new(),
            })
        }
        Some((container, rest)) => {
            let member = rest.strip_suffix(')').ok_or_else(malformed)?;
            if member.contains('(') || member.contains(')') {
                return Err(malformed());
            }
            Ok(QualifiedName {
                container: container.to_string(),
                member: member.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pds_member() {
        let name = parse("PDS.NAME(MEMBER)").unwrap();
        assert_eq!(name.container, "PDS.NAME");
        assert_eq!(name.member, "MEMBER");
    }

    #[test]
    fn test_parse_bare_dataset() {
        let name = parse("PDS.NAME").unwrap();
        assert_eq!(name.container, "PDS.NAME");
        assert_eq!(name.member, "");
    }

    #[test]
    fn test_require_member_on_bare_name() {
        let name = parse("APPL.SEQ").unwrap();
        assert!(name.require_member().is_err());
    }

    #[test]
    fn test_parse_unbalanced() {
        assert!(parse("PDS.NAME(MEMBER").is_err());
        assert!(parse("PDS.NAME)MEMBER(").is_err());
        assert!(parse("PDS.NAME((MEMBER))").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let name = parse("APPL.LOAD(PROGA)").unwrap();
        assert_eq!(name.to_string(), "APPL.LOAD(PROGA)");
        let bare = parse("APPL.LOAD").unwrap();
        assert_eq!(bare.to_string(), "APPL.LOAD");
    }
}
