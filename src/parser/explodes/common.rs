use std::collections::HashMap;

use crate::error::ParseError;
use crate::models::{Proxy, Transport};
use crate::utils::base64::base64_decode;
use crate::utils::url::url_decode;

/// Explode a proxy link into a Proxy object
///
/// This function detects the type of proxy link from its scheme and calls
/// the appropriate parser.
pub fn explode(link: &str) -> Result<Proxy, ParseError> {
    let link = link.trim();

    let scheme = match link.find("://") {
        Some(pos) => link[..pos].to_ascii_lowercase(),
        None => {
            return Err(ParseError::UnsupportedProtocol(
                "missing `scheme://` prefix".to_string(),
            ))
        }
    };

    let node = match scheme.as_str() {
        "vmess" => super::vmess::explode_vmess(link),
        "vless" => super::vless::explode_vless(link),
        "trojan" => super::trojan::explode_trojan(link),
        "ss" => super::ss::explode_ss(link),
        "ssr" => super::ssr::explode_ssr(link),
        "http" | "https" => super::http::explode_http(link),
        _ => Err(ParseError::UnsupportedProtocol(scheme)),
    }?;

    log::debug!(
        "Parsed {} node `{}` ({}:{})",
        node.proxy_type().as_str(),
        node.remark,
        node.hostname,
        node.port
    );
    Ok(node)
}

/// Split subscription content into individual link lines
///
/// Blank lines are dropped and the remaining lines trimmed, order preserved.
/// Content that is a single Base64 blob decoding to a link list is unwrapped
/// first.
pub fn explode_sub(sub: &str) -> Vec<String> {
    let sub = sub.trim();

    let content = if sub.contains("://") {
        sub.to_string()
    } else {
        match base64_decode(sub) {
            Some(decoded) if decoded.contains("://") => decoded,
            _ => sub.to_string(),
        }
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip `scheme://` from a link, ignoring case.
pub(crate) fn strip_scheme<'a>(link: &'a str, scheme: &str) -> Result<&'a str, ParseError> {
    let prefix = format!("{}://", scheme);
    match link.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(&prefix) => Ok(&link[prefix.len()..]),
        _ => Err(ParseError::UnsupportedProtocol(format!(
            "expected a {} link",
            scheme
        ))),
    }
}

/// Parse a mandatory port value.
pub(crate) fn parse_port(raw: &str) -> Result<u16, ParseError> {
    match raw.trim().trim_end_matches('/').parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ParseError::malformed(format!("invalid port `{}`", raw))),
    }
}

/// Parse an optional port, using `default` when the link leaves it out.
pub(crate) fn port_or_default(raw: Option<&str>, default: u16) -> Result<u16, ParseError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => parse_port(raw),
        _ => Ok(default),
    }
}

/// Decode a `#fragment` into a remark. Empty when there is none.
pub(crate) fn decode_remark(fragment: Option<&str>) -> String {
    fragment.map(url_decode).unwrap_or_default()
}

/// Query value that is present and not blank.
pub(crate) fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}

/// Split a comma separated ALPN list.
pub(crate) fn split_alpn(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Log when an id that should be a UUID does not look like one.
pub(crate) fn check_uuid(id: &str) {
    if uuid::Uuid::parse_str(id).is_err() {
        log::warn!("User id `{}` is not a valid UUID, keeping it as-is", id);
    }
}

/// Apply the transport related query parameters shared by the URI dialects
/// (`type`, `path`, `host`, `serviceName`, `alpn`, `fp`, HTTP upgrade).
pub(crate) fn apply_stream_params(node: &mut Proxy, params: &HashMap<String, String>) {
    let network = non_empty(params, "type").unwrap_or("tcp");
    let http_upgrade = network.eq_ignore_ascii_case("httpupgrade")
        || non_empty(params, "v2ray-http-upgrade").is_some_and(is_truthy);
    node.set_transport(Transport::from_link_value(network), http_upgrade);

    node.ws_host = non_empty(params, "host").map(str::to_string);
    if node.transport == Transport::Grpc {
        node.grpc_service_name = non_empty(params, "serviceName")
            .or_else(|| non_empty(params, "grpc-service-name"))
            .map(str::to_string);
    } else {
        node.ws_path = non_empty(params, "path").map(str::to_string);
    }

    if let Some(alpn) = non_empty(params, "alpn") {
        node.alpn = split_alpn(alpn);
    }
    node.fingerprint = non_empty(params, "fp").map(str::to_string);
}
