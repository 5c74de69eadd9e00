use super::common::{
    apply_stream_params, check_uuid, decode_remark, non_empty, port_or_default, strip_scheme,
};
use crate::error::ParseError;
use crate::models::{Proxy, ProxySettings, RealityOptions};
use crate::utils::url::{parse_query, split_host_port, split_link, url_decode};

/// Parse a VLESS link into a Proxy object
///
/// Format: `vless://uuid@host:port?type=ws&security=tls&...#remark`
pub fn explode_vless(vless: &str) -> Result<Proxy, ParseError> {
    let body = strip_scheme(vless, "vless")?;
    let parts = split_link(body);

    let (user_info, server_port) = parts
        .authority
        .rsplit_once('@')
        .ok_or_else(|| ParseError::malformed("VLESS link has no user id"))?;
    let uuid = url_decode(user_info);
    if uuid.trim().is_empty() {
        return Err(ParseError::malformed("VLESS link has an empty user id"));
    }
    check_uuid(&uuid);

    let (host, port) = split_host_port(server_port);
    if host.is_empty() {
        return Err(ParseError::malformed("VLESS link has no server address"));
    }
    let port = port_or_default(port, 443)?;

    let params = parts.query.map(parse_query).unwrap_or_default();
    let security = non_empty(&params, "security").unwrap_or("none");

    let mut node = Proxy::new(
        ProxySettings::Vless {
            uuid,
            flow: non_empty(&params, "flow").map(str::to_string),
        },
        &decode_remark(parts.fragment),
        host,
        port,
    );
    apply_stream_params(&mut node, &params);

    node.tls = matches!(security, "tls" | "reality");
    node.server_name = non_empty(&params, "sni")
        .or_else(|| non_empty(&params, "host"))
        .map(str::to_string);

    if security == "reality" {
        node.reality = non_empty(&params, "pbk").map(|public_key| RealityOptions {
            public_key: public_key.to_string(),
            short_id: non_empty(&params, "sid").map(str::to_string),
        });
    }

    Ok(node)
}
