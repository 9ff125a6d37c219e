use std::env;

use anyhow::Result;
use cfnres_cli::cli::{Cli, Commands};
use cfnres_cli::commands;
use cfnres_cli::config::loader::load_config;
use cfnres_cli::observability;
use clap::Parser;
use colored::Colorize;

/// How the configuration path was determined.
#[derive(Debug, Clone, Copy)]
enum ConfigSource {
    /// From --config CLI argument
    CliArgument,
    /// From CFNRES_CONFIG environment variable
    EnvironmentVariable,
    /// Default path (cfnres.toml), optional
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliArgument => write!(f, "CLI argument (--config)"),
            Self::EnvironmentVariable => write!(f, "environment variable (CFNRES_CONFIG)"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist - it's optional
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound) {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    observability::init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{} {e:#}", "✗".red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let (config_path, source) = resolve_config_path(cli.config.as_deref());
    let cfg = match source {
        ConfigSource::Default => load_config(None),
        _ => load_config(config_path.as_deref()),
    };
    let cfg = match cfg {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    tracing::debug!(
        path = config_path.as_deref().unwrap_or("cfnres.toml"),
        source = %source,
        "Configuration loaded"
    );
    observability::apply_logging_level(&cfg.logging.level);

    let log_stream_name = cfg.log_stream_name(cli.log_stream.as_deref());

    match cli.command {
        Commands::Process(args) => {
            let event = commands::read_event(&args.event)?;
            let ack = commands::process(&cfg, event, log_stream_name).await?;
            println!("{}", serde_json::to_string_pretty(&ack)?);
        }
        Commands::Signal(args) => {
            let event = commands::read_event(&args.event)?;
            let status = args.status;
            commands::signal(
                &cfg,
                event,
                log_stream_name,
                status,
                args.reason,
                args.physical_id,
            )
            .await?;
            println!("{} Reported {status}", "✓".green());
        }
        Commands::Render(args) => {
            let event = commands::read_event(&args.event)?;
            let document = commands::render(
                event,
                log_stream_name,
                args.status,
                args.reason,
                args.physical_id,
            );
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }
    Ok(())
}

/// Resolves the config path: `--config`, then `CFNRES_CONFIG`, then the default.
fn resolve_config_path(cli_path: Option<&str>) -> (Option<String>, ConfigSource) {
    if let Some(path) = cli_path {
        return (Some(path.to_string()), ConfigSource::CliArgument);
    }
    if let Ok(path) = env::var("CFNRES_CONFIG") {
        return (Some(path), ConfigSource::EnvironmentVariable);
    }
    (None, ConfigSource::Default)
}
