use axum::http::HeaderMap;

/// Header carrying the direct-connection client address, set by Cloudflare
/// and compatible fronting proxies.
pub const DIRECT_ADDRESS_HEADER: &str = "CF-Connecting-IP";

/// Standard forwarding chain: the original client first, then one entry per
/// proxy hop.
pub const FORWARDED_CHAIN_HEADER: &str = "X-Forwarded-For";

/// Best-effort recovery of the client network address from proxy headers.
///
/// `CF-Connecting-IP` wins when present and non-empty; otherwise the first
/// comma-separated entry of `X-Forwarded-For` is taken, trimmed. The value
/// is passed through with no address-syntax validation.
///
/// Known limitation: the first `X-Forwarded-For` entry is supplied by the
/// peer and nothing here verifies that the immediate caller is a trusted
/// proxy, so the result is advisory rather than authenticated.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(direct) = header_text(headers, DIRECT_ADDRESS_HEADER)
        && !direct.is_empty()
    {
        return Some(direct.to_string());
    }

    let chain = header_text(headers, FORWARDED_CHAIN_HEADER)?;
    let first = chain.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

/// Read a header as text; values that are not visible ASCII count as absent.
fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
