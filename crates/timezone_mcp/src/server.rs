use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, request::Parts};
use axum::routing::get;
use axum::{Json, Router};
use rmcp::{
    RoleServer, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
    transport::sse_server::{SseServer, SseServerConfig},
    transport::streamable_http_server::{
        StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
    },
};
use tokio_util::sync::CancellationToken;

use crate::core::error::McpResult;
use crate::core::extractor::client_ip;
use crate::core::models::TimezoneReport;
use crate::core::provider::GeoIpProvider;

/// Fixed paths: the SSE transport stream and its message post-back, the
/// streamable HTTP transport, and the JSON diagnostic endpoint.
pub const SSE_PATH: &str = "/sse";
pub const SSE_MESSAGE_PATH: &str = "/sse/message";
pub const MCP_PATH: &str = "/mcp";
pub const TIMEZONE_PATH: &str = "/timezone";

/// Keep-alive ping period for both HTTP transports.
const SSE_KEEP_ALIVE: Duration = Duration::from_secs(15);

/// Tool reply when the invocation carried no recoverable HTTP request, or
/// the request named no client address.
const NO_ADDRESS_REPLY: &str =
    "Cannot determine IP (only available in HTTP/SSE remote calls), timezone: unknown";

/// Tool reply when the address was found but the lookup produced nothing.
const NO_TIMEZONE_REPLY: &str = "Could not determine timezone for your IP address.";

/// Timezone MCP Server: a single tool that geolocates the calling client.
#[derive(Clone)]
pub struct TimezoneService {
    provider: GeoIpProvider,
    tool_router: ToolRouter<TimezoneService>,
}

impl TimezoneService {
    pub fn new(provider: GeoIpProvider) -> Self {
        Self {
            provider,
            tool_router: Self::tool_router(),
        }
    }

    /// Resolve the tool reply for a call that arrived with `headers`, or
    /// with `None` when the invocation had no underlying HTTP request
    /// (stdio and other in-process transports).
    pub(crate) async fn timezone_message(&self, headers: Option<&HeaderMap>) -> String {
        let Some(ip) = headers.and_then(client_ip) else {
            return NO_ADDRESS_REPLY.to_string();
        };

        match self.provider.lookup_timezone(&ip).await {
            Some(timezone) => format!("Your timezone is: {}", timezone),
            None => NO_TIMEZONE_REPLY.to_string(),
        }
    }
}

/// The HTTP transports store the inbound request head in the call's
/// extensions; local transports leave it unset.
fn headers_from_extensions(extensions: &Extensions) -> Option<&HeaderMap> {
    extensions.get::<Parts>().map(|parts| &parts.headers)
}

#[tool_router]
impl TimezoneService {
    #[tool(
        description = "Get the caller's timezone, inferred from the IP address the request arrived from"
    )]
    async fn get_timezone(
        &self,
        context: RequestContext<RoleServer>,
    ) -> McpResult<CallToolResult> {
        let headers = headers_from_extensions(&context.extensions);
        let reply = self.timezone_message(headers).await;

        Ok(CallToolResult::success(vec![Content::text(reply)]))
    }
}

#[tool_handler]
impl ServerHandler for TimezoneService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Timezone MCP Server. Tool: get_timezone (no parameters) reports the calling client's timezone by geolocating the address its request arrived from; best effort, replies 'unknown' when the address or zone cannot be determined.".to_string(),
            ),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<InitializeResult> {
        tracing::info!("Timezone MCP Server initialized successfully");
        Ok(self.get_info())
    }
}

/// GET /timezone: run the extractor and, when an address was found, the
/// resolver; report both outcomes.
async fn timezone_handler(
    State(provider): State<GeoIpProvider>,
    headers: HeaderMap,
) -> Json<TimezoneReport> {
    let ip = client_ip(&headers);
    let timezone = match &ip {
        Some(ip) => provider.lookup_timezone(ip).await,
        None => None,
    };

    Json(TimezoneReport { timezone, ip })
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Assemble the HTTP application: both protocol transports, the diagnostic
/// endpoint, and the 404 fallback. Each transport connection gets its own
/// service clone from a factory closure.
pub fn build_app(provider: GeoIpProvider, bind: SocketAddr, ct: CancellationToken) -> Router {
    let (sse_server, sse_router) = SseServer::new(SseServerConfig {
        bind,
        sse_path: SSE_PATH.to_string(),
        post_path: SSE_MESSAGE_PATH.to_string(),
        ct,
        sse_keep_alive: Some(SSE_KEEP_ALIVE),
    });
    // Connections stop when the config token above is cancelled; the token
    // returned here belongs to the same cancellation tree.
    let sse_provider = provider.clone();
    let _ = sse_server.with_service(move || TimezoneService::new(sse_provider.clone()));

    let http_provider = provider.clone();
    let streamable: StreamableHttpService<TimezoneService, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(TimezoneService::new(http_provider.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: Some(SSE_KEEP_ALIVE),
                stateful_mode: true,
            },
        );

    Router::new()
        .route(TIMEZONE_PATH, get(timezone_handler))
        .with_state(provider)
        .merge(sse_router)
        .nest_service(MCP_PATH, streamable)
        .fallback(not_found)
}

/// Serve the HTTP stack until ctrl-c.
pub async fn run_http(
    provider: GeoIpProvider,
    bind: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    let local_addr = listener.local_addr()?;

    let ct = CancellationToken::new();
    let app = build_app(provider, local_addr, ct.clone());

    tracing::info!("Timezone MCP server listening on {}", local_addr);

    let signal_ct = ct.clone();
    let shutdown = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("shutdown signal error: {}", e);
        }
        signal_ct.cancel();
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    ct.cancel();

    Ok(())
}

/// Serve the MCP service over stdio. No HTTP request exists on this
/// transport, so `get_timezone` always reports the address as unavailable.
pub async fn run_stdio(provider: GeoIpProvider) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::{ServiceExt, transport::stdio};

    let service = TimezoneService::new(provider)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
