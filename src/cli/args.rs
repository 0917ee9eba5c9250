//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gorefresh",
    about = "Rebuild Go binaries that were built from the current GOPATH",
    after_help = "\
EXAMPLES:
    gorefresh                      Examine every binary in $GOPATH/bin, ask before updating
    gorefresh --force              Same, but update without asking
    gorefresh gopls staticcheck    Update specific binaries (resolved against $GOPATH/bin)"
)]
pub struct Args {
    /// Binaries to update; relative paths are resolved against $GOPATH/bin.
    /// With no arguments, every regular file in $GOPATH/bin is examined.
    #[arg(value_name = "BINARY")]
    pub binaries: Vec<PathBuf>,

    /// Narrate each resolution step
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip the confirmation prompt (batch mode only)
    #[arg(short, long)]
    pub force: bool,
}
