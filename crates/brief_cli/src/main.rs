use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logging;

use cli::{run, Cli};
use logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let logger = init_logging(cli.verbose);
    run(cli, &logger).await
}
