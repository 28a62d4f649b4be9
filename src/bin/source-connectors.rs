use std::path::Path;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use source_connectors::config::loader;
use source_connectors::connectors::build_connector;
use source_connectors::observability::metrics::encode_metrics;
use source_connectors::utils::http_client::build_client;
use source_connectors::utils::logging::{self, LogLevel};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "connectors.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// print prometheus metrics to stdout after the command
    #[arg(long)]
    print_metrics: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Authenticate and probe the upstream API
    Check { connector: String },
    /// List the streams a connector exposes
    Streams { connector: String },
}

impl Command {
    fn connector(&self) -> &str {
        match self {
            Command::Check { connector } | Command::Streams { connector } => connector,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = loader::file_to_config(Path::new(&args.config)).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Build connector
    // -------------------------------

    let name = args.command.connector();
    let connector_config = service_config
        .connectors
        .get(name)
        .ok_or_else(|| anyhow!("connector '{}' is not defined in {}", name, args.config))?;
    let client = build_client(&service_config.settings.http)?;
    let connector = build_connector(name, connector_config, &client)?;
    info!(connector = name, connector_type = connector_config.type_name(), "connector ready");

    // -------------------------------
    // 3. Run command
    // -------------------------------

    let output = match &args.command {
        Command::Check { .. } => {
            let status = connector.check_connection().await?;
            json!({ "connector": name, "status": status })
        }
        Command::Streams { .. } => {
            json!({ "connector": name, "streams": connector.streams() })
        }
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if args.print_metrics {
        print!("{}", encode_metrics().await?);
    }

    Ok(())
}
