//! Fingerprint stamping: correlate deployable records with manifest artifacts
//!
//! A record matches an artifact when the record's member name equals the
//! artifact name and the leading segment of the artifact's `path` property
//! equals the record's container. Matched artifacts get a `fingerprint`
//! property: the load-module identifier for LOAD artifacts, the precomputed
//! manifest hash otherwise. Records without a match are routine (not every
//! build output is tracked in the manifest) and are skipped silently.

use super::Manifest;
use crate::build_result::DeployableRecord;
use crate::copy_mode::{resolve_copy_mode, CopyMode, CopyModeTable};
use crate::dataset::{self, DatasetError};
use crate::fingerprint::{FingerprintError, FingerprintProvider};

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),
}

/// Stamp fingerprints for every deployable record into the manifest.
///
/// Mutates the manifest in place. Re-running with identical inputs yields an
/// identical manifest.
pub fn update_fingerprints(
    manifest: &mut Manifest,
    records: &[DeployableRecord],
    table: Option<&CopyModeTable>,
    provider: &dyn FingerprintProvider,
) -> Result<(), UpdateError> {
    for record in records {
        let name = dataset::parse(&record.dataset)?;
        let member = name.require_member()?;

        for artifact in &mut manifest.artifacts {
            if artifact.name != member {
                continue;
            }
            // Leading path segment must agree with the record's container.
            let Some(path) = artifact.property("path") else {
                continue;
            };
            if path.split('/').next() != Some(name.container.as_str()) {
                continue;
            }

            let fingerprint = match resolve_copy_mode(&artifact.artifact_type, table) {
                CopyMode::Load => {
                    let module = dataset::QualifiedName {
                        container: name.container.clone(),
                        member: artifact.name.clone(),
                    };
                    provider.load_module_fingerprint(&module)?
                }
                CopyMode::Binary | CopyMode::Text => artifact.hash.clone(),
            };

            println!(
                "** Register fingerprint for '{}({})': {}",
                name.container, artifact.name, fingerprint
            );
            artifact.set_fingerprint(&fingerprint);
        }
    }
    Ok(())
}
