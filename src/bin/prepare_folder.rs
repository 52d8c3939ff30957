//! dbb-prepare-folder CLI
//!
//! Copies deployable DBB build outputs into a local staging folder laid out
//! as `<workingFolder>/<container>/<member>.<deployType>`.

use clap::{CommandFactory, Parser};
use dbb_deploy_prep::stage::{stage_build_outputs, PrepareOptions};
use dbb_deploy_prep::{BuildResult, CopyModeTable, SystemRunner};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "dbb-prepare-folder")]
#[command(about = "Copy deployable DBB build outputs into a local staging folder", version)]
struct Cli {
    /// The DBB build result file
    #[arg(long, short = 'b')]
    build_result: PathBuf,

    /// The path to the working folder
    #[arg(long, short = 'w')]
    working_folder: PathBuf,

    /// The path to the file that contains copy mode properties
    #[arg(long, short = 'c')]
    copy_mode_properties: Option<PathBuf>,
}

fn main() {
    // Zero arguments prints usage and takes no action.
    if std::env::args().len() <= 1 {
        let _ = Cli::command().print_help();
        return;
    }
    let cli = Cli::parse();

    // An unusable override table is a configuration error; abort before
    // touching any record.
    let copy_mode_table = match cli.copy_mode_properties {
        Some(ref path) => match CopyModeTable::from_file(path) {
            Ok(table) => Some(table),
            Err(e) => {
                eprintln!("*! {}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    let build_result = match BuildResult::from_file(&cli.build_result) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("*! {}", e);
            process::exit(1);
        }
    };

    let mut options = PrepareOptions::new(cli.working_folder);
    options.copy_mode_table = copy_mode_table;

    if let Err(e) = stage_build_outputs(&SystemRunner, &build_result, &options) {
        eprintln!("*! {}", e);
        process::exit(1);
    }
}
