//! Local staging of deployable build outputs
//!
//! Copies each deployable output from its z/OS dataset into
//! `<workingFolder>/<container>/<member>.<deployType>`, picking the copy
//! command from the output's copy mode, and tags the staged file as binary.
//! Copy and tag commands only execute on z/OS (`//'DSN'` source notation and
//! `chtag` exist only there); elsewhere the run narrates and lays out
//! directories. Any non-zero command status is fatal with no rollback.

use std::fs;
use std::path::{Path, PathBuf};

use crate::build_result::BuildResult;
use crate::copy_mode::{resolve_copy_mode, CopyMode, CopyModeTable};
use crate::dataset::{self, DatasetError};
use crate::exec::{CommandRunner, ExecError};

/// Options for the staging operation.
pub struct PrepareOptions {
    pub working_folder: PathBuf,
    pub copy_mode_table: Option<CopyModeTable>,
    /// Execute the copy/tag commands. Defaults to [`on_zos`].
    pub run_commands: bool,
}

impl PrepareOptions {
    pub fn new(working_folder: PathBuf) -> Self {
        Self {
            working_folder,
            copy_mode_table: None,
            run_commands: on_zos(),
        }
    }
}

/// True when running on z/OS UNIX System Services.
pub fn on_zos() -> bool {
    std::env::consts::OS == "zos"
}

#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("couldn't create staging directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("command '{command}' failed (rc={status}) out: {stdout} error: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stdout: String,
        stderr: String,
    },
}

/// Stage every deployable output of the build result locally.
pub fn stage_build_outputs(
    runner: &dyn CommandRunner,
    build_result: &BuildResult,
    options: &PrepareOptions,
) -> Result<(), PrepareError> {
    for record in build_result.deployable_records() {
        let name = dataset::parse(&record.dataset)?;
        name.require_member()?;

        let container_dir = options.working_folder.join(&name.container);
        let target = container_dir.join(format!("{}.{}", name.member, record.deploy_type));
        println!("** Copy //'{}' to {}", record.dataset, target.display());

        fs::create_dir_all(&container_dir).map_err(|source| PrepareError::CreateDir {
            path: container_dir.display().to_string(),
            source,
        })?;

        let mode = resolve_copy_mode(&record.deploy_type, options.copy_mode_table.as_ref());
        let copy = copy_command(mode, &record.dataset, &target);

        if options.run_commands {
            run_fatal(runner, &copy)?;
            run_fatal(runner, &tag_command(&target))?;
        }
    }
    Ok(())
}

/// The z/OS copy command for one staged output.
pub fn copy_command(mode: CopyMode, dataset: &str, target: &Path) -> Vec<String> {
    let source = format!("//'{}'", dataset);
    let target = target.display().to_string();
    match mode {
        CopyMode::Load => vec!["cp".into(), "-XI".into(), source, target],
        CopyMode::Binary => vec!["cp".into(), "-F".into(), "bin".into(), source, target],
        CopyMode::Text => vec!["cp".into(), source, target],
    }
}

/// Tag a staged file as binary content.
pub fn tag_command(target: &Path) -> Vec<String> {
    vec!["chtag".into(), "-b".into(), target.display().to_string()]
}

/// Run a staging command; any non-zero status terminates the operation.
fn run_fatal(runner: &dyn CommandRunner, argv: &[String]) -> Result<(), PrepareError> {
    let args: Vec<&str> = argv[1..].iter().map(String::as_str).collect();
    let output = runner.run(&argv[0], &args)?;
    if !output.success() {
        return Err(PrepareError::CommandFailed {
            command: argv.join(" "),
            status: output.status,
            stdout: output.stdout.trim().to_string(),
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_command_per_mode() {
        let target = Path::new("/wf/APPL.LOAD/PROGA.LOAD");
        assert_eq!(
            copy_command(CopyMode::Load, "APPL.LOAD(PROGA)", target),
            ["cp", "-XI", "//'APPL.LOAD(PROGA)'", "/wf/APPL.LOAD/PROGA.LOAD"]
        );
        assert_eq!(
            copy_command(CopyMode::Binary, "APPL.LOAD(PROGA)", target),
            ["cp", "-F", "bin", "//'APPL.LOAD(PROGA)'", "/wf/APPL.LOAD/PROGA.LOAD"]
        );
        assert_eq!(
            copy_command(CopyMode::Text, "APPL.LOAD(PROGA)", target),
            ["cp", "//'APPL.LOAD(PROGA)'", "/wf/APPL.LOAD/PROGA.LOAD"]
        );
    }

    #[test]
    fn test_tag_command() {
        assert_eq!(
            tag_command(Path::new("/wf/APPL.LOAD/PROGA.LOAD")),
            ["chtag", "-b", "/wf/APPL.LOAD/PROGA.LOAD"]
        );
    }
}
