use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::info;
use placemerge::{MergeOptions, merge_directory, write_merged};

/// Merge pplacer results computed on differently numbered copies of one
/// reference tree into the edge numbering of a base tree.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory with all pplacer results (.json files)
    input_dir: PathBuf,

    /// The base tree file
    base_tree: PathBuf,

    /// Output json file name
    output: PathBuf,

    /// Sort the fragments by name
    #[arg(short, long)]
    sort: bool,

    /// Debug output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<()> {
    let options = MergeOptions { sort: args.sort, ..MergeOptions::default() };
    let outcome = merge_directory(&args.input_dir, &args.base_tree, &options)?;
    write_merged(&args.output, &outcome.document)?;
    info!(
        "Wrote {} placements to {}.",
        outcome.document.placements.len(),
        args.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level),
    )
    .format_timestamp(None)
    .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
