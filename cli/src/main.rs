//! Job board service CLI
//!
//! ```sh
//! # Run with default config (~/.config/jobboard/config.toml)
//! jobboard
//!
//! # Custom config path
//! jobboard --config /etc/jobboard/config.toml
//!
//! # Override the listen port
//! jobboard --port 9000
//!
//! # Validate config without starting
//! jobboard --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use jobboard::config::AppConfig;
use jobboard::server::{init_tracing, ServerHandle, ServerOptions};

/// Job boards with saved, de-duplicated filter sets.
#[derive(Parser, Debug)]
#[command(
    name = "jobboard",
    version,
    about = "Job board service with saved filter sets",
    long_about = "Job board HTTP service: boards resolved by subdomain, job listings \
                  and uniquely named filter sets.\n\n\
                  Default config: ~/.config/jobboard/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "JOBBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Override the HTTP listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(jobboard::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            // The log level override must apply before tracing starts
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            if cli.check {
                eprintln!("Invalid configuration in {}: {}", config_path.display(), e);
                return Err(e.into());
            }
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new(
                    cli.log_level.as_deref().unwrap_or("info"),
                ))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    config.validate()?;

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Server name : {}", config.site.server_name);
        println!("   Root board  : {}", config.site.root_board);
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {} ({})", config.logging.level, config.logging.format);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
