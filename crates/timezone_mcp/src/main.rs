use std::env;
use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mcp_server_timezone::core::provider::{DEFAULT_GEO_API_URL, GeoIpProvider};
use mcp_server_timezone::server;

#[derive(Parser, Debug)]
#[command(name = "mcp-server-timezone")]
#[command(about = "MCP server that reports the caller's timezone from its IP address")]
#[command(version)]
struct Args {
    /// Address to bind the HTTP transports on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Base URL of the geolocation lookup service
    #[arg(long, default_value = DEFAULT_GEO_API_URL)]
    geo_api_url: String,

    /// Serve over stdio instead of HTTP (for local MCP clients; the client
    /// address is never recoverable there)
    #[arg(long)]
    stdio: bool,
}

/// Timezone MCP Server
///
/// Reports the calling client's timezone by geolocating the network address
/// its request arrived from. Serves the MCP SSE and streamable HTTP
/// transports plus a JSON diagnostic endpoint, or stdio with `--stdio`.
///
/// Usage: npx @modelcontextprotocol/inspector cargo run --bin mcp-server-timezone
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging only if LOG_LEVEL environment variable is set
    if let Ok(log_level) = env::var("LOG_LEVEL") {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
            )
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();

        tracing::info!("Starting Timezone MCP server with log level: {}", log_level);
    }

    let provider = GeoIpProvider::new(&args.geo_api_url)?;

    let result = if args.stdio {
        server::run_stdio(provider).await
    } else {
        server::run_http(provider, args.bind).await
    };

    if let Err(e) = result {
        // Only log error if logging is initialized
        if env::var("LOG_LEVEL").is_ok() {
            tracing::error!("Error running Timezone MCP server: {}", e);
        }
        return Err(e);
    }

    Ok(())
}
