//! mesh-check: run the conformance engine over JSON fixtures.

use clap::Parser;

use mesh_check::logging::{init_logging, LogConfig};
use mesh_check::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_env())?;

    if let Some(output) = run(&cli)? {
        println!("{output}");
    }

    Ok(())
}
