use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use yamlsync::validator::validate_files;

/// Checks that each file parses as YAML.
#[derive(Debug, Parser)]
#[command(name = "yaml-validator", version)]
struct Args {
    /// Files to check. Names starting with `-` are taken as files.
    #[arg(allow_hyphen_values = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut failed = false;
    for result in validate_files(&args.files) {
        println!("{}", result);
        failed |= !result.is_valid();
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
