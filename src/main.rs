use clap::Parser;
use std::process::ExitCode;

use zig_deps::{Cli, Output};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    match cli.run().await {
        Ok(code) => code,
        Err(err) => {
            Output::new(false, quiet).error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
