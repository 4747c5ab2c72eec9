use rmcp::ErrorData as McpError;

/// Custom error types for better error handling
///
/// Lookup faults never reach an MCP client: the resolver logs them and
/// degrades to the absence signal. They are typed so the log line can say
/// which stage gave out. The configuration variants surface at startup.
#[derive(Debug, thiserror::Error)]
pub enum TimezoneServerError {
    #[error("Invalid lookup base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("HTTP client error: {message}")]
    ClientError { message: String },
    #[error("Lookup request for {ip} failed: {message}")]
    LookupRequest { ip: String, message: String },
    #[error("Lookup response for {ip} could not be decoded: {message}")]
    LookupDecode { ip: String, message: String },
    #[error("Lookup service refused {ip}: {message}")]
    LookupRefused { ip: String, message: String },
}

pub type TimezoneServerResult<T> = Result<T, TimezoneServerError>;
pub type McpResult<T> = Result<T, McpError>;
