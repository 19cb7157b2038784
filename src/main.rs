use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use nestegg::api::{Cli, Command, run_http_server, run_project};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => {
            if let Err(e) = run_http_server(args.addr()).await {
                error!(error = %e, "server error");
                std::process::exit(1);
            }
        }
        Command::Project(args) => match run_project(&args) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!(error = %e, "projection failed");
                std::process::exit(1);
            }
        },
    }
}
