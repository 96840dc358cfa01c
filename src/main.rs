use clap::Parser;
use logsweep::app::{handle_fatal_error, init_logging, run_analysis, AppConfig};
use logsweep::cli::Cli;
use logsweep::config::load_config;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let app_config = AppConfig::new(cli.verbose);

    let config = match load_config(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&app_config);
            handle_fatal_error(e.into(), cli.verbose)
        }
    };

    init_logging(&app_config.with_base_log_level(config.log_level.as_str()));
    debug!(input = %cli.input.display(), "Configuration loaded");

    let mut stdout = std::io::stdout();
    if let Err(e) = run_analysis(&mut stdout, &cli.input, &config).await {
        handle_fatal_error(e, cli.verbose);
    }
}
