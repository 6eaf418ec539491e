//! osfmirror CLI: walk an OSF project and write its manifest.

use anyhow::Result;
use clap::Parser;
use osfmirror::engine::arg_parser::Cli;
use osfmirror::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
