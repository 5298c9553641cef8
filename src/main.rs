//! boluswatch - insulin bolus monitoring tool
//!
//! A command-line tool that polls a loopback uploader API for recent
//! insulin boluses and raises a local alert when a new dose at or above
//! the clinical threshold appears.

use clap::Parser;

use boluswatch::cli::args::{generate_completions, Cli, Commands};
use boluswatch::commands::{run_check, run_reset, run_status, run_stop, run_watch};
use boluswatch::config::{Config, ConfigBuilder};
use boluswatch::error::{ApiError, AppError};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    let result = build_config(&cli).and_then(|config| {
        // Set log level based on verbose flag (CLI or config file)
        if config.general.verbose {
            log::set_max_level(log::LevelFilter::Debug);
        }
        run(&cli, &config)
    });

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<Config, AppError> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())
        .with_verbose(cli.verbose.then_some(true))
        .with_base_url(cli.base_url.clone())
        .with_threshold(cli.threshold)
        .with_state_path(cli.state_file.clone())
        .build();

    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    match &cli.command {
        Commands::Check => run_check(config, cli.format),

        Commands::Watch(args) => run_watch(args, config, cli.format),

        Commands::Status => run_status(config, cli.format),

        Commands::Stop => run_stop(config, cli.format),

        Commands::Reset => run_reset(config, cli.format),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Api(ApiError::Request { .. }) => {
            eprintln!();
            eprintln!("Hint: Make sure the uploader app is running and its local");
            eprintln!("      web service is listening on the configured port.");
        }
        AppError::Store(_) => {
            eprintln!();
            eprintln!("Hint: Check permissions on the state directory, or pass");
            eprintln!("      --state-file to use a different location.");
        }
        _ => {}
    }
}
