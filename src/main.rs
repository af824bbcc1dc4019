use lingocheck::cli::commands::{CliArgs, Commands};
use lingocheck::cli::handlers::{handle_check, handle_languages, handle_serve};
use lingocheck::util::logging::{self, LoggingConfig};
use lingocheck::{LingoConfig, VERSION};

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config = config_from_args(&args);
    logging::init_logging(LoggingConfig::from_config(&config));

    debug!("lingocheck v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Serve(serve_args) => handle_serve(serve_args, config).await,
        Commands::Check(check_args) => handle_check(check_args, &config).await,
        Commands::Languages(languages_args) => handle_languages(languages_args, &config).await,
    };

    std::process::exit(exit_code);
}

/// Environment configuration with the global logging flags applied on top
fn config_from_args(args: &CliArgs) -> LingoConfig {
    let mut config = LingoConfig::default();

    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    } else if args.verbose {
        config.log_level = "debug".to_string();
    } else if args.quiet {
        config.log_level = "error".to_string();
    }

    config
}
