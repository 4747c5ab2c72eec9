//! Timezone MCP server.
//!
//! Exposes a single `get_timezone` tool over the MCP SSE and streamable HTTP
//! transports (or stdio for local clients), inferring the caller's network
//! address from proxy headers and resolving it to an IANA zone name through
//! a geolocation lookup service. A plain JSON endpoint at `/timezone`
//! reports the same inference for diagnostics.

pub mod core;
pub mod server;
