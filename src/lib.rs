//! DBB Deploy Prep - staging and manifest tooling for DBB build results
//!
//! This crate post-processes an IBM DBB build result for deployment: it
//! classifies which build-result records represent deployable outputs, copies
//! those outputs from z/OS datasets into a local staging layout, and stamps
//! content fingerprints plus SCM metadata into a Wazi Deploy manifest.

pub mod build_result;
pub mod copy_mode;
pub mod dataset;
pub mod exec;
pub mod fingerprint;
pub mod manifest;
pub mod scm;
pub mod stage;

pub use build_result::{BuildResult, DeployableRecord, Record};
pub use copy_mode::{resolve_copy_mode, CopyMode, CopyModeTable};
pub use dataset::QualifiedName;
pub use exec::{CommandOutput, CommandRunner, SystemRunner};
pub use fingerprint::{FingerprintProvider, IdrbTool};
pub use manifest::{Artifact, Manifest};
