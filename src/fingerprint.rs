//! Content fingerprints for matched artifacts
//!
//! Non-load artifacts carry a precomputed hash in the manifest; load modules
//! are identified by their IDR (identification record) value, obtained from
//! an external load-module utility.

use crate::dataset::QualifiedName;
use crate::exec::{CommandRunner, ExecError};

#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("load module utility failed for {dataset} (rc={status}): {stderr}")]
    Lookup {
        dataset: String,
        status: i32,
        stderr: String,
    },

    #[error("load module utility returned no identifier for {dataset}")]
    Empty { dataset: String },
}

/// Source of load-module fingerprints.
pub trait FingerprintProvider {
    /// Identifier of the load module at `CONTAINER(MEMBER)`.
    fn load_module_fingerprint(&self, dataset: &QualifiedName)
        -> Result<String, FingerprintError>;
}

/// Default program used to read load-module IDR data.
const DEFAULT_LMUTIL: &str = "dbb-lmutil";

/// Environment variable overriding the load-module utility path.
pub const LMUTIL_PATH_VAR: &str = "DBB_LMUTIL_PATH";

/// Provider that shells out to the load-module IDR utility.
///
/// The utility takes the `CONTAINER(MEMBER)` name as its single argument and
/// prints the identifier on stdout.
pub struct IdrbTool<'a> {
    runner: &'a dyn CommandRunner,
    program: String,
}

impl<'a> IdrbTool<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        let program =
            std::env::var(LMUTIL_PATH_VAR).unwrap_or_else(|_| DEFAULT_LMUTIL.to_string());
        Self { runner, program }
    }

    pub fn with_program(runner: &'a dyn CommandRunner, program: &str) -> Self {
        Self {
            runner,
            program: program.to_string(),
        }
    }
}

impl FingerprintProvider for IdrbTool<'_> {
    fn load_module_fingerprint(
        &self,
        dataset: &QualifiedName,
    ) -> Result<String, FingerprintError> {
        let name = dataset.to_string();
        let output = self.runner.run(&self.program, &[&name])?;
        if !output.success() {
            return Err(FingerprintError::Lookup {
                dataset: name,
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            });
        }
        let id = output.stdout.trim();
        if id.is_empty() {
            return Err(FingerprintError::Empty { dataset: name });
        }
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::CommandOutput;

    struct FakeRunner {
        status: i32,
        stdout: &'static str,
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, _program: &str, args: &[&str]) -> Result<CommandOutput, ExecError> {
            assert_eq!(args, ["APPL.LOAD(PROGA)"]);
            Ok(CommandOutput {
                status: self.status,
                stdout: self.stdout.to_string(),
                stderr: String::new(),
            })
        }
    }

    fn name() -> QualifiedName {
        crate::dataset::parse("APPL.LOAD(PROGA)").unwrap()
    }

    #[test]
    fn test_trims_utility_output() {
        let runner = FakeRunner {
            status: 0,
            stdout: "IEW2278I-20240131-091502\n",
        };
        let tool = IdrbTool::with_program(&runner, "lmutil-test");
        let fp = tool.load_module_fingerprint(&name()).unwrap();
        assert_eq!(fp, "IEW2278I-20240131-091502");
    }

    #[test]
    fn test_nonzero_status_is_error() {
        let runner = FakeRunner {
            status: 8,
            stdout: "",
        };
        let tool = IdrbTool::with_program(&runner, "lmutil-test");
        assert!(tool.load_module_fingerprint(&name()).is_err());
    }

    #[test]
    fn test_empty_output_is_error() {
        let runner = FakeRunner {
            status: 0,
            stdout: "  \n",
        };
        let tool = IdrbTool::with_program(&runner, "lmutil-test");
        assert!(matches!(
            tool.load_module_fingerprint(&name()),
            Err(FingerprintError::Empty { .. })
        ));
    }
}
