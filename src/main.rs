//! auth-converter
//!
//! ```text
//!     Client Request                                              Upstream
//!     Authorization: Basic dXNlcjpwYXNz                           Server
//!     ──────────────▶ ┌──────────┐   ┌───────────┐   ┌─────────┐    ▲
//!                     │  trace   │──▶│ converter │──▶│ forward │────┘
//!                     │ timeout  │   │  layer    │   │ handler │
//!                     └──────────┘   └───────────┘   └─────────┘
//!                                  Authorization: Bearer userpass
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use auth_converter::config::{load_config, AppConfig, ConverterConfig};
use auth_converter::http::{shutdown_signal, HttpServer};
use auth_converter::observability::{logging, metrics};
use auth_converter::ConversionRules;

#[derive(Parser)]
#[command(name = "auth-converter")]
#[command(about = "Rewrites Authorization headers in front of an upstream", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the converting proxy
    Serve {
        /// Path to a TOML config file; defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Convert a single header value and print the result
    Convert {
        /// Inbound Authorization value, e.g. "Basic dXNlcjpwYXNz"
        #[arg(long)]
        header: String,

        #[arg(long, default_value = "combined")]
        token_source: String,

        #[arg(long)]
        encode_token: bool,

        #[arg(long, default_value = "Basic")]
        source_type: String,

        #[arg(long, default_value = "Bearer")]
        target_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => AppConfig::default(),
            };
            serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Convert {
            header,
            token_source,
            encode_token,
            source_type,
            target_type,
        } => {
            let rules = ConversionRules::try_from(&ConverterConfig {
                token_source,
                encode_token,
                source_type,
                target_type,
            })?;

            match rules.convert(header.as_bytes()) {
                Ok(value) => {
                    println!("{}", String::from_utf8_lossy(value.as_bytes()));
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("header left unchanged: {e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        token_source = %config.converter.token_source,
        target_type = %config.converter.target_type,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
