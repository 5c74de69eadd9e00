use serde_json::Value;

use super::common::{check_uuid, parse_port, split_alpn, strip_scheme};
use crate::error::ParseError;
use crate::models::{Proxy, ProxySettings, Transport};
use crate::utils::base64::base64_decode;

/// Read a JSON field as text. Numbers and booleans are stringified,
/// blank strings count as absent.
fn json_string(json: &Value, key: &str) -> Option<String> {
    match &json[key] {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a VMess link into a Proxy object
///
/// Format: `vmess://base64(json)` where the JSON follows the v2rayN layout
/// (`ps`, `add`, `port`, `id`, `aid`, `scy`, `net`, `host`, `path`, `tls`, `sni`).
pub fn explode_vmess(vmess: &str) -> Result<Proxy, ParseError> {
    let encoded = strip_scheme(vmess, "vmess")?;

    let decoded = base64_decode(encoded)
        .ok_or_else(|| ParseError::malformed("VMess payload is not valid base64"))?;

    let json: Value = serde_json::from_str(&decoded)
        .map_err(|e| ParseError::malformed(format!("VMess payload is not valid JSON: {}", e)))?;
    if !json.is_object() {
        return Err(ParseError::malformed("VMess payload is not a JSON object"));
    }

    let add = json_string(&json, "add")
        .ok_or_else(|| ParseError::malformed("VMess link has no server address"))?;
    let port = json_string(&json, "port")
        .ok_or_else(|| ParseError::malformed("VMess link has no port"))
        .and_then(|port| parse_port(&port))?;
    let id = json_string(&json, "id")
        .ok_or_else(|| ParseError::malformed("VMess link has no user id"))?;
    check_uuid(&id);

    // alterId is carried along but never validated
    let aid = json_string(&json, "aid")
        .and_then(|aid| aid.parse::<u32>().ok())
        .unwrap_or(0);
    let cipher = json_string(&json, "scy").unwrap_or_else(|| "auto".to_string());
    let remark = json_string(&json, "ps").unwrap_or_default();

    let net = json_string(&json, "net").unwrap_or_else(|| "tcp".to_string());
    let http_upgrade = match &json["v2ray-http-upgrade"] {
        Value::Bool(flag) => *flag,
        Value::String(flag) => flag == "true",
        _ => false,
    } || net.eq_ignore_ascii_case("httpupgrade");

    let host = json_string(&json, "host");
    let path = json_string(&json, "path");

    let mut node = Proxy::new(
        ProxySettings::VMess {
            uuid: id,
            alter_id: aid,
            cipher,
        },
        &remark,
        &add,
        port,
    );
    node.set_transport(Transport::from_link_value(&net), http_upgrade);
    node.tls = json["tls"].as_str() == Some("tls");
    node.server_name = json_string(&json, "sni").or_else(|| host.clone());
    node.ws_host = host;

    if node.transport == Transport::Grpc {
        node.grpc_service_name = json_string(&json, "grpc-service-name").or(path);
    } else {
        node.ws_path = path;
    }

    if let Some(alpn) = json_string(&json, "alpn") {
        node.alpn = split_alpn(&alpn);
    }
    node.fingerprint = json_string(&json, "fp");

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProxyType;
    use crate::utils::base64::base64_encode;

    fn vmess_link(json: &str) -> String {
        format!("vmess://{}", base64_encode(json))
    }

    #[test]
    fn test_explode_vmess_ws_tls() {
        let link = vmess_link(
            r#"{"v":"2","ps":"HK 01","add":"1.2.3.4","port":"443","id":"b831381d-6324-4d53-ad4f-8cda48b30811","aid":"0","scy":"auto","net":"ws","type":"none","host":"cdn.example.com","path":"/ray","tls":"tls","sni":"sni.example.com"}"#,
        );
        let node = explode_vmess(&link).unwrap();

        assert_eq!(node.proxy_type(), ProxyType::VMess);
        assert_eq!(node.remark, "HK 01");
        assert_eq!(node.hostname, "1.2.3.4");
        assert_eq!(node.port, 443);
        assert_eq!(node.transport, Transport::WebSocket);
        assert!(node.tls);
        assert_eq!(node.server_name.as_deref(), Some("sni.example.com"));
        assert_eq!(node.ws_host.as_deref(), Some("cdn.example.com"));
        assert_eq!(node.ws_path.as_deref(), Some("/ray"));
        assert_eq!(
            node.settings,
            ProxySettings::VMess {
                uuid: "b831381d-6324-4d53-ad4f-8cda48b30811".to_string(),
                alter_id: 0,
                cipher: "auto".to_string(),
            }
        );
    }

    #[test]
    fn test_explode_vmess_numeric_fields_and_defaults() {
        let link = vmess_link(r#"{"add":"example.com","port":8080,"id":"uuid","aid":4}"#);
        let node = explode_vmess(&link).unwrap();

        assert_eq!(node.port, 8080);
        assert_eq!(node.remark, "VMess Server");
        assert_eq!(node.transport, Transport::Tcp);
        assert!(!node.tls);
        match node.settings {
            ProxySettings::VMess {
                alter_id, cipher, ..
            } => {
                assert_eq!(alter_id, 4);
                assert_eq!(cipher, "auto");
            }
            other => panic!("unexpected settings {:?}", other),
        }
    }

    #[test]
    fn test_explode_vmess_tls_requires_literal() {
        let link = vmess_link(r#"{"add":"a.com","port":"443","id":"u","tls":"true"}"#);
        assert!(!explode_vmess(&link).unwrap().tls);
    }

    #[test]
    fn test_explode_vmess_http_upgrade_overrides_net() {
        let link = vmess_link(
            r#"{"add":"a.com","port":"80","id":"u","net":"grpc","path":"/up","v2ray-http-upgrade":true}"#,
        );
        let node = explode_vmess(&link).unwrap();
        assert_eq!(node.transport, Transport::WebSocket);
        assert!(node.http_upgrade);
        assert_eq!(node.ws_path.as_deref(), Some("/up"));
    }

    #[test]
    fn test_explode_vmess_grpc_service_name_from_path() {
        let link = vmess_link(r#"{"add":"a.com","port":"443","id":"u","net":"grpc","path":"svc"}"#);
        let node = explode_vmess(&link).unwrap();
        assert_eq!(node.transport, Transport::Grpc);
        assert_eq!(node.grpc_service_name.as_deref(), Some("svc"));
        assert_eq!(node.ws_path, None);
    }

    #[test]
    fn test_explode_vmess_invalid_base64() {
        let err = explode_vmess("vmess://@@not-base64@@").unwrap_err();
        assert!(matches!(err, ParseError::MalformedPayload(_)));
    }

    #[test]
    fn test_explode_vmess_invalid_json() {
        let err = explode_vmess(&vmess_link("not json")).unwrap_err();
        assert!(matches!(err, ParseError::MalformedPayload(_)));
    }

    #[test]
    fn test_explode_vmess_missing_mandatory_fields() {
        for json in [
            r#"{"port":"443","id":"u"}"#,
            r#"{"add":"a.com","id":"u"}"#,
            r#"{"add":"a.com","port":"443"}"#,
            r#"{"add":"a.com","port":"0","id":"u"}"#,
        ] {
            let err = explode_vmess(&vmess_link(json)).unwrap_err();
            assert!(matches!(err, ParseError::MalformedPayload(_)), "{}", json);
        }
    }
}
