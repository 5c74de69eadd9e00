use url::Url;

use super::common::decode_remark;
use crate::error::ParseError;
use crate::models::{Proxy, ProxySettings};
use crate::utils::url::url_decode;

/// Parse an HTTP/HTTPS proxy link into a Proxy object
///
/// Format: `http[s]://[user[:pass]@]host[:port][#remark]`. The `https`
/// scheme turns TLS on; the port defaults to the scheme's well-known port.
pub fn explode_http(link: &str) -> Result<Proxy, ParseError> {
    let url = Url::parse(link)
        .map_err(|e| ParseError::malformed(format!("invalid HTTP proxy link: {}", e)))?;

    let tls = match url.scheme() {
        "http" => false,
        "https" => true,
        other => return Err(ParseError::UnsupportedProtocol(other.to_string())),
    };

    let host = url
        .host_str()
        .map(|host| host.trim_start_matches('[').trim_end_matches(']'))
        .filter(|host| !host.is_empty())
        .ok_or_else(|| ParseError::malformed("HTTP proxy link has no server address"))?;

    let port = match url.port_or_known_default() {
        Some(port) if port != 0 => port,
        _ => return Err(ParseError::malformed("HTTP proxy link has an invalid port")),
    };

    let username = Some(url.username())
        .filter(|user| !user.is_empty())
        .map(url_decode);
    let password = url.password().filter(|pass| !pass.is_empty()).map(url_decode);

    let mut node = Proxy::new(
        ProxySettings::Http { username, password },
        &decode_remark(url.fragment()),
        host,
        port,
    );
    node.tls = tls;

    Ok(node)
}
