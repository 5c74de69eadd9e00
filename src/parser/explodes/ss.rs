use std::collections::HashMap;

use super::common::{decode_remark, non_empty, port_or_default, strip_scheme};
use crate::error::ParseError;
use crate::models::{Proxy, ProxySettings, Transport};
use crate::utils::base64::base64_decode;
use crate::utils::url::{parse_query, split_host_port, split_link, url_decode};

/// Look up `key=value` in a `;` separated plugin option string.
fn plugin_opt(opts: &str, key: &str) -> Option<String> {
    opts.split(';').find_map(|item| {
        let (k, v) = item.split_once('=')?;
        (k.trim() == key && !v.trim().is_empty()).then(|| v.trim().to_string())
    })
}

/// Whether the plugin options turn TLS on (`tls`, `tls=1`, `tls=true`).
fn plugin_tls(opts: &str) -> bool {
    opts.split(';').map(str::trim).any(|item| {
        matches!(item, "tls" | "tls=1" | "tls=true")
    })
}

fn is_v2ray_plugin(plugin: &str) -> bool {
    matches!(plugin, "v2ray-plugin" | "xray-plugin")
}

/// Split the SIP002 `plugin` parameter into name and options.
fn split_plugin(params: &HashMap<String, String>) -> (Option<String>, Option<String>) {
    let (plugin, opts) = match non_empty(params, "plugin") {
        Some(value) => match value.split_once(';') {
            Some((name, opts)) => (Some(name.to_string()), Some(opts.to_string())),
            None => (Some(value.to_string()), None),
        },
        None => (None, None),
    };

    let opts = opts
        .filter(|opts| !opts.is_empty())
        .or_else(|| non_empty(params, "plugin_opts").map(str::to_string))
        .or_else(|| non_empty(params, "plugin-opts").map(str::to_string));
    (plugin, opts)
}

/// Parse a Shadowsocks link into a Proxy object
///
/// Both encodings are accepted, tried in this order:
/// * SIP002: `ss://base64(method:password)@host:port?query#remark`; when the
///   user info is not Base64 it is read as percent-encoded plaintext.
/// * Legacy: `ss://base64(method:password@host:port)#remark`.
pub fn explode_ss(ss: &str) -> Result<Proxy, ParseError> {
    let body = strip_scheme(ss, "ss")?;
    let parts = split_link(body);

    let (user_info, server_port) = match parts.authority.rsplit_once('@') {
        Some((encoded, server_port)) => {
            // `=` padding is often sent as `%3D`
            let unescaped = url_decode(encoded);
            let user_info = base64_decode(&unescaped).unwrap_or(unescaped);
            (user_info, server_port.to_string())
        }
        None => {
            let decoded = base64_decode(parts.authority)
                .ok_or_else(|| ParseError::malformed("Shadowsocks payload is not valid base64"))?;
            let (user_info, server_port) = decoded
                .rsplit_once('@')
                .ok_or_else(|| ParseError::malformed("Shadowsocks payload has no server address"))?;
            (user_info.to_string(), server_port.to_string())
        }
    };

    let (method, password) = user_info
        .split_once(':')
        .ok_or_else(|| ParseError::malformed("Shadowsocks user info is not `method:password`"))?;
    if method.trim().is_empty() {
        return Err(ParseError::malformed("Shadowsocks link has no cipher"));
    }

    let (host, port) = split_host_port(&server_port);
    if host.is_empty() {
        return Err(ParseError::malformed("Shadowsocks link has no server address"));
    }
    let port = port_or_default(port, 8388)?;

    let params = parts.query.map(parse_query).unwrap_or_default();
    let (plugin, plugin_opts) = split_plugin(&params);
    let opts = plugin_opts.as_deref().unwrap_or("");

    let transport = match non_empty(&params, "type") {
        Some(network) => Transport::from_link_value(network),
        None if plugin.as_deref().is_some_and(is_v2ray_plugin)
            && plugin_opt(opts, "mode").map_or(true, |mode| mode == "websocket") =>
        {
            Transport::WebSocket
        }
        None => Transport::Tcp,
    };

    let tls = non_empty(&params, "security") == Some("tls") || plugin_tls(opts);
    let ws_path = non_empty(&params, "path")
        .map(str::to_string)
        .or_else(|| plugin_opt(opts, "path"));
    let ws_host = non_empty(&params, "host")
        .map(str::to_string)
        .or_else(|| plugin_opt(opts, "host"))
        .or_else(|| plugin_opt(opts, "obfs-host"));

    let mut node = Proxy::new(
        ProxySettings::Shadowsocks {
            method: method.to_string(),
            password: password.to_string(),
            plugin,
            plugin_opts,
        },
        &decode_remark(parts.fragment),
        host,
        port,
    );
    node.set_transport(transport, false);
    node.tls = tls;
    node.ws_path = ws_path;
    node.ws_host = ws_host;
    node.server_name = non_empty(&params, "sni").map(str::to_string);

    Ok(node)
}
