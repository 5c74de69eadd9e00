use super::common::{apply_stream_params, decode_remark, non_empty, port_or_default, strip_scheme};
use crate::error::ParseError;
use crate::models::{Proxy, ProxySettings};
use crate::utils::url::{parse_query, split_host_port, split_link};

/// Parse a Trojan link into a Proxy object
///
/// Format: `trojan://password@host:port?sni=...&type=ws#remark`. The password
/// is used verbatim and TLS is always on.
pub fn explode_trojan(trojan: &str) -> Result<Proxy, ParseError> {
    let body = strip_scheme(trojan, "trojan")?;
    let parts = split_link(body);

    let (password, server_port) = parts
        .authority
        .rsplit_once('@')
        .ok_or_else(|| ParseError::malformed("Trojan link has no password"))?;
    if password.is_empty() {
        return Err(ParseError::malformed("Trojan link has an empty password"));
    }

    let (host, port) = split_host_port(server_port);
    if host.is_empty() {
        return Err(ParseError::malformed("Trojan link has no server address"));
    }
    let port = port_or_default(port, 443)?;

    let params = parts.query.map(parse_query).unwrap_or_default();

    let mut node = Proxy::new(
        ProxySettings::Trojan {
            password: password.to_string(),
        },
        &decode_remark(parts.fragment),
        host,
        port,
    );
    apply_stream_params(&mut node, &params);

    node.tls = true;
    // "peer" is the older spelling of sni
    node.server_name = Some(
        non_empty(&params, "sni")
            .or_else(|| non_empty(&params, "peer"))
            .unwrap_or(host)
            .to_string(),
    );

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProxyType, Transport};

    #[test]
    fn test_explode_trojan_defaults() {
        let node = explode_trojan("trojan://p%40ss@example.com:443#Tokyo%201").unwrap();

        assert_eq!(node.proxy_type(), ProxyType::Trojan);
        assert_eq!(node.remark, "Tokyo 1");
        assert!(node.tls);
        assert_eq!(node.server_name.as_deref(), Some("example.com"));
        assert_eq!(node.transport, Transport::Tcp);
        // password is not percent-decoded
        assert_eq!(node.settings.credential(), Some("p%40ss"));
    }

    #[test]
    fn test_explode_trojan_ws_with_sni() {
        let node = explode_trojan(
            "trojan://secret@1.2.3.4:8443?security=tls&sni=front.example.com&type=ws&path=%2Ftj&host=cdn.example.com",
        )
        .unwrap();

        assert_eq!(node.port, 8443);
        assert_eq!(node.remark, "Trojan Server");
        assert_eq!(node.server_name.as_deref(), Some("front.example.com"));
        assert_eq!(node.transport, Transport::WebSocket);
        assert_eq!(node.ws_path.as_deref(), Some("/tj"));
        assert_eq!(node.ws_host.as_deref(), Some("cdn.example.com"));
    }

    #[test]
    fn test_explode_trojan_server_name_ignores_host_param() {
        let node = explode_trojan("trojan://pw@h.example.com:443?host=cdn.example.com").unwrap();
        assert_eq!(node.server_name.as_deref(), Some("h.example.com"));
        assert_eq!(node.ws_host.as_deref(), Some("cdn.example.com"));

        let node = explode_trojan("trojan://pw@h.example.com:443?peer=old.example.com").unwrap();
        assert_eq!(node.server_name.as_deref(), Some("old.example.com"));
    }

    #[test]
    fn test_explode_trojan_tls_even_when_security_none() {
        let node = explode_trojan("trojan://secret@example.com:443?security=none").unwrap();
        assert!(node.tls);
    }

    #[test]
    fn test_explode_trojan_missing_password() {
        assert!(matches!(
            explode_trojan("trojan://example.com:443"),
            Err(ParseError::MalformedPayload(_))
        ));
    }
}
