use clap::Parser;
use tracing::info;

use prnote::annotate;
use prnote::cli::Cli;
use prnote::config::Config;
use prnote::github::DefaultGitHubClient;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    info!("prnote starting");

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    info!(
        artifact_dir = %config.artifact_dir.display(),
        run_type = %config.run_type,
        repo = %config.repo,
        dry_run = config.dry_run,
        "config loaded"
    );

    let client = DefaultGitHubClient::new(&config.token);

    if let Err(e) = annotate::run(&client, &config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
