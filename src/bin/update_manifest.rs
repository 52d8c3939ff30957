//! dbb-update-manifest CLI
//!
//! Stamps per-artifact content fingerprints plus SCM and build-report
//! metadata into a Wazi Deploy manifest, rewriting it in place.

use clap::{CommandFactory, Parser};
use dbb_deploy_prep::manifest::{self, default_manifest_path};
use dbb_deploy_prep::{scm, BuildResult, IdrbTool, Manifest, SystemRunner};
use serde_yaml::Value;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "dbb-update-manifest")]
#[command(about = "Stamp fingerprints and SCM metadata into a Wazi Deploy manifest", version)]
struct Cli {
    /// The DBB build result file
    #[arg(long, short = 'b')]
    build_result: PathBuf,

    /// The path to the source folder
    #[arg(long, short = 's')]
    source_folder: PathBuf,

    /// The path to the manifest to update
    /// (default: <sourceFolder>/deployment-manifest.yml)
    #[arg(long, short = 'm')]
    manifest: Option<PathBuf>,
}

fn main() {
    // Zero arguments prints usage and takes no action.
    if std::env::args().len() <= 1 {
        let _ = Cli::command().print_help();
        return;
    }
    let cli = Cli::parse();

    let manifest_path = cli
        .manifest
        .unwrap_or_else(|| default_manifest_path(&cli.source_folder));
    println!("** Update the manifest {}", manifest_path.display());

    let build_result = match BuildResult::from_file(&cli.build_result) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("*! {}", e);
            process::exit(1);
        }
    };
    let records = build_result.deployable_records();

    let mut manifest = match Manifest::from_file(&manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("*! {}", e);
            process::exit(1);
        }
    };

    let runner = SystemRunner;

    // SCM identity always overwrites the prior annotation; git failures have
    // already been reported and leave fields empty.
    let scm_info = scm::collect(&runner, &cli.source_folder);
    match serde_yaml::to_value(&scm_info) {
        Ok(value) => manifest.set_annotation("scm", value),
        Err(e) => {
            eprintln!("*! {}", e);
            process::exit(1);
        }
    }

    if let Some(url) = build_result.build_report_url() {
        let mut dbb = serde_yaml::Mapping::new();
        dbb.insert(
            Value::String("build_result_uri".to_string()),
            Value::String(url.to_string()),
        );
        manifest.set_annotation("dbb", Value::Mapping(dbb));
    }

    let provider = IdrbTool::new(&runner);
    if let Err(e) = manifest::update_fingerprints(&mut manifest, &records, None, &provider) {
        eprintln!("*! {}", e);
        process::exit(1);
    }

    if let Err(e) = manifest.write_to_file(&manifest_path) {
        eprintln!("*! {}", e);
        process::exit(1);
    }
}
