use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use abagenta_client::{AgentaBackend, HttpBackend, SimulatedBackend};
use abagenta_config::Config;
use abagenta_gateway::{start_server, GatewayState, SessionRegistry};
use abagenta_tools::catalog;

#[derive(Parser)]
#[command(name = "abagenta")]
#[command(about = "aB-Agenta MCP server — business records over the Model Context Protocol")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show the health of a running server
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("abagenta is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    info!(config = ?config.redacted(), "Starting aB-Agenta MCP server");

    if config.test_mode {
        info!("Running in TEST MODE - no remote API calls will be made");
    }

    let backend: Arc<dyn AgentaBackend> = if config.test_mode {
        Arc::new(SimulatedBackend::new())
    } else {
        Arc::new(HttpBackend::new(&config)?)
    };

    let registry = Arc::new(catalog(backend));
    info!(tools = registry.len(), "Tool catalog registered");

    let state = GatewayState {
        registry,
        sessions: Arc::new(SessionRegistry::new()),
        test_mode: config.test_mode,
        debug: config.debug,
    };

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    start_server(addr, state).await
}
