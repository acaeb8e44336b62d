//! tracelens CLI entry point.

use tracelens_lib::cli::{self, Cli};
use tracelens_lib::core::Result;

fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Execute the command
    cli::execute(cli)
}
