use std::process::ExitCode;

use clap::Parser;
use compound::api::{Cli, Command, run_http_server, run_project};
use compound::logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Project(args) => match run_project(&args) {
            Ok(output) => {
                print!("{output}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::from(2)
            }
        },
        Command::Serve(args) => {
            if let Err(e) = run_http_server(args.addr()).await {
                tracing::error!(error = %e, "server error");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}
