use super::common::{parse_port, strip_scheme};
use crate::error::ParseError;
use crate::models::{Proxy, ProxySettings};
use crate::utils::base64::base64_decode;
use crate::utils::url::parse_query;

/// Parse a ShadowsocksR link into a Proxy object
///
/// Format: `ssr://base64(server:port:protocol:method:obfs:base64(password)/?params)`
/// where every value in `params` (`obfsparam`, `protoparam`, `remarks`,
/// `group`, `password`) is Base64 encoded on its own.
pub fn explode_ssr(ssr: &str) -> Result<Proxy, ParseError> {
    let encoded = strip_scheme(ssr, "ssr")?;

    let decoded = base64_decode(encoded)
        .ok_or_else(|| ParseError::malformed("ShadowsocksR payload is not valid base64"))?;

    let (main, query) = match decoded.split_once('?') {
        Some((main, query)) => (main.trim_end_matches('/'), Some(query)),
        None => (decoded.as_str(), None),
    };

    // Split from the right so an IPv6 server keeps its colons
    let fields: Vec<&str> = main.rsplitn(6, ':').collect();
    if fields.len() < 6 {
        return Err(ParseError::malformed(format!(
            "ShadowsocksR payload needs 6 fields, found {}",
            fields.len()
        )));
    }
    let (password_encoded, obfs, method, protocol, port, server) =
        (fields[0], fields[1], fields[2], fields[3], fields[4], fields[5]);

    let server = server.trim_start_matches('[').trim_end_matches(']');
    if server.is_empty() {
        return Err(ParseError::malformed("ShadowsocksR link has no server address"));
    }
    let port = parse_port(port)?;

    let params: Vec<(String, String)> = query
        .map(parse_query)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| base64_decode(&value).map(|decoded| (key, decoded)))
        .collect();
    let param = |key: &str| {
        params
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
    };

    let password = if password_encoded.is_empty() {
        param("password")
    } else {
        base64_decode(password_encoded)
    }
    .ok_or_else(|| ParseError::malformed("ShadowsocksR password is missing or not base64"))?;

    if let Some(group) = param("group") {
        log::debug!("ShadowsocksR node belongs to group `{}`", group);
    }

    Ok(Proxy::new(
        ProxySettings::ShadowsocksR {
            method: method.to_string(),
            password,
            protocol: protocol.to_string(),
            protocol_param: param("protoparam"),
            obfs: obfs.to_string(),
            obfs_param: param("obfsparam"),
        },
        &param("remarks").unwrap_or_default(),
        server,
        port,
    ))
}
