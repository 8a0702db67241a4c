//! Passerelle CLI - chat-completion gateway
//!
//! # Commands
//!
//! - `serve` - Start the gateway server
//! - `info` - Show version info

use std::sync::Arc;

use clap::{Parser, Subcommand};
use passerelle::{
    api::{create_router, AppState},
    config::{GatewayConfig, DEFAULT_MODEL_ID},
    error::{GatewayError, Result},
    model::EchoModel,
};

/// Passerelle - chat-completion gateway in front of a causal language model
#[derive(Parser)]
#[command(name = "passerelle")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Model identifier advertised in responses
        #[arg(long, default_value = DEFAULT_MODEL_ID)]
        model_id: String,

        /// Use the built-in deterministic demo backend
        #[arg(long)]
        demo: bool,

        /// Additional token budget beyond the prompt length
        #[arg(long, default_value = "256")]
        max_new_tokens: usize,

        /// Sampling temperature
        #[arg(short, long, default_value = "0.7")]
        temperature: f32,
    },
    /// Show version and configuration info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            model_id,
            demo,
            max_new_tokens,
            temperature,
        } => {
            let config = GatewayConfig::new()
                .with_host(host)
                .with_port(port)
                .with_model_id(model_id)
                .with_max_new_tokens(max_new_tokens)
                .with_temperature(temperature);
            serve(config, demo).await?;
        },
        Commands::Info => {
            println!("Passerelle v{}", passerelle::VERSION);
            println!("Chat-completion gateway");
            println!();
            println!("Endpoints:");
            println!("  GET  /                        - Status message");
            println!("  GET  /health                  - Health check");
            println!("  GET  /metrics                 - Request counters");
            println!("  POST /api/v1/chat/completions - Chat completion");
        },
    }

    Ok(())
}

/// Build the application state and serve until shutdown
///
/// A missing model backend is fatal here, before the listener binds: the
/// process must not serve traffic it cannot complete.
async fn serve(config: GatewayConfig, demo: bool) -> Result<()> {
    if !demo {
        return Err(GatewayError::ModelUnavailable {
            reason: "no model backend configured; pass --demo or embed a CausalModel via AppState"
                .to_string(),
        });
    }

    let state = AppState::new(Arc::new(EchoModel::new()), &config);
    let app = create_router(state);
    let addr = config.bind_addr()?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        GatewayError::InvalidConfiguration {
            reason: format!("failed to bind {addr}: {e}"),
        }
    })?;

    println!("Gateway listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET  /health                  - Health check");
    println!("  GET  /metrics                 - Request counters");
    println!("  POST /api/v1/chat/completions - Chat completion");
    println!();
    println!("Example:");
    println!("  curl http://{addr}/health");
    println!();
    tracing::info!("serving model {} on {addr}", config.model_id);

    axum::serve(listener, app)
        .await
        .map_err(|e| GatewayError::InvalidConfiguration {
            reason: format!("server error: {e}"),
        })?;

    Ok(())
}
