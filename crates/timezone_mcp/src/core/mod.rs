//! # Timezone MCP Server Core
//!
//! Request-scoped building blocks for the timezone server. Everything here
//! lives for one request: an optional client address inferred from headers,
//! and an optional zone name resolved from that address.
//!
//! ## Modules
//! - `error`: Custom error types and error handling
//! - `extractor`: Client address recovery from trusted proxy headers
//! - `models`: Wire shapes for the lookup reply and the diagnostic report
//! - `provider`: Outbound geolocation lookup

pub mod error;
pub mod extractor;
pub mod models;
pub mod provider;
