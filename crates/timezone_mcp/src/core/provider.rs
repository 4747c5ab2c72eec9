use url::Url;

use crate::core::{
    error::{TimezoneServerError, TimezoneServerResult},
    models::GeoResponse,
};

/// Default lookup service; `--geo-api-url` overrides it.
pub const DEFAULT_GEO_API_URL: &str = "https://ip-api.com";

/// Query string selecting the only reply fields the server reads.
const FIELDS_QUERY: &str = "fields=status,message,timezone";

/// Geolocation lookup client.
///
/// One outbound request per call, no retries, no caching, and no explicit
/// timeout; a hung lookup is bounded only by the network stack's own
/// defaults.
#[derive(Clone)]
pub struct GeoIpProvider {
    http: reqwest::Client,
    base_url: Url,
}

impl GeoIpProvider {
    /// Build a provider against `base_url` (e.g. `https://ip-api.com`).
    pub fn new(base_url: &str) -> TimezoneServerResult<Self> {
        let base = Url::parse(base_url).map_err(|e| TimezoneServerError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(TimezoneServerError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "not a base URL".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TimezoneServerError::ClientError {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base,
        })
    }

    /// Resolve `ip` to an IANA zone name, best effort.
    ///
    /// This is deliberately two-outcome: a zone, or the absence signal.
    /// Transport faults, undecodable bodies and refusals from the lookup
    /// service are logged here and never surfaced to the caller.
    pub async fn lookup_timezone(&self, ip: &str) -> Option<String> {
        match self.fetch_timezone(ip).await {
            Ok(timezone) => timezone,
            Err(e) => {
                tracing::error!("GeoIP lookup failed: {}", e);
                None
            }
        }
    }

    async fn fetch_timezone(&self, ip: &str) -> TimezoneServerResult<Option<String>> {
        let url = self.endpoint(ip);

        let response =
            self.http
                .get(url)
                .send()
                .await
                .map_err(|e| TimezoneServerError::LookupRequest {
                    ip: ip.to_string(),
                    message: e.to_string(),
                })?;

        let geo: GeoResponse =
            response
                .json()
                .await
                .map_err(|e| TimezoneServerError::LookupDecode {
                    ip: ip.to_string(),
                    message: e.to_string(),
                })?;

        if !geo.is_success() {
            return Err(TimezoneServerError::LookupRefused {
                ip: ip.to_string(),
                message: geo
                    .message
                    .unwrap_or_else(|| "no failure message".to_string()),
            });
        }

        Ok(geo.timezone)
    }

    /// `{base}/json/{ip}?fields=status,message,timezone`, with the address
    /// percent-encoded as a single path segment.
    fn endpoint(&self, ip: &str) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL validated in new()")
            .pop_if_empty()
            .push("json")
            .push(ip);
        url.set_query(Some(FIELDS_QUERY));
        url
    }
}
