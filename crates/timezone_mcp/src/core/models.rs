use serde::{Deserialize, Serialize};

/// Reply shape of the geolocation lookup service, narrowed to the fields
/// the server asks for (`fields=status,message,timezone`).
#[derive(Debug, Clone, Deserialize)]
pub struct GeoResponse {
    /// `"success"` or `"fail"`.
    pub status: String,
    /// Failure reason, present only when the lookup fails.
    #[serde(default)]
    pub message: Option<String>,
    /// IANA zone name, present only on success.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl GeoResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Body of the `/timezone` diagnostic endpoint: the inferred client address
/// and the zone it resolved to, either of which may be null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimezoneReport {
    pub timezone: Option<String>,
    pub ip: Option<String>,
}
