//! # gorefresh - Main Entry Point
//!
//! Two modes:
//! - **Batch** (no arguments): examine every regular file in `$GOPATH/bin`,
//!   asking before each update unless `--force` is given.
//! - **Explicit** (`gorefresh tool1 tool2`): process the named binaries,
//!   always asking; `--force` does not apply.
//!
//! Exit status is zero regardless of per-binary outcomes. The only fatal
//! condition is `GOPATH` being unset at startup.

use clap::Parser;
use gorefresh::cli::Args;
use gorefresh::config::Workspace;
use gorefresh::domain::Outcome;
use gorefresh::update::{GoToolchain, StdinConfirm, Updater};
use log::LevelFilter;
use std::path::Path;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let workspace = match Workspace::from_env() {
        Ok(workspace) => workspace,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let mut updater = Updater::new(&workspace, StdinConfirm, GoToolchain);

    if args.binaries.is_empty() {
        match updater.process_all(!args.force) {
            Ok(outcomes) => {
                for (path, outcome) in outcomes {
                    report(&path, &outcome, false);
                }
            }
            Err(err) => eprintln!("error: cannot read '{}': {err}", workspace.bin_dir.display()),
        }
    } else {
        // Explicitly named targets are always confirmed
        for path in &args.binaries {
            let outcome = updater.process_binary(path, true);
            report(path, &outcome, true);
        }
    }
}

/// `--verbose` raises the default filter so the per-step `debug!` narration
/// shows up; an explicit `RUST_LOG` still wins.
fn init_logging(verbose: bool) {
    let default = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new().filter_level(default).parse_default_env().init();
}

/// One human-readable status line per binary. Batch mode keeps quiet about
/// files that simply aren't ours; explicitly named targets always get an
/// answer.
fn report(path: &Path, outcome: &Outcome, explicit: bool) {
    if outcome.is_silent() && !explicit {
        return;
    }
    match outcome {
        Outcome::Updated => println!("Updated '{}'", path.display()),
        Outcome::SkippedByUser => println!("Skipped '{}'", path.display()),
        Outcome::Failed(reason) | Outcome::Undecodable(reason) => {
            println!("Failed to process '{}': {reason}", path.display());
        }
        Outcome::NotAGoBinary => {
            println!("Failed to process '{}': not a Go built binary", path.display());
        }
        Outcome::Ineligible => {
            println!("Failed to process '{}': not built from the current GOPATH", path.display());
        }
    }
}
