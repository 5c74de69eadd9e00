use crate::generator::yaml::clash_output::{
    ClashProxy, ClashProxyCommon, CommonProxyOptions, GrpcOpts, PluginOpts, RealityOpts,
    WsHeaders, WsOpts,
};
use crate::models::{Proxy, ProxySettings, Transport};

/// Convert a parsed node into its Clash proxy entry.
///
/// The entry is named by [`Proxy::display_name`], so names must already be
/// deduplicated.
pub fn proxy_to_clash(node: &Proxy) -> ClashProxy {
    let common = build_common_proxy_options(node);

    let mut proxy = match &node.settings {
        ProxySettings::VMess {
            uuid,
            alter_id,
            cipher,
        } => handle_vmess(node, common, uuid, *alter_id, cipher),
        ProxySettings::Vless { uuid, flow } => handle_vless(node, common, uuid, flow),
        ProxySettings::Trojan { password } => handle_trojan(node, common, password),
        ProxySettings::Shadowsocks {
            method,
            password,
            plugin,
            plugin_opts,
        } => handle_shadowsocks(node, common, method, password, plugin, plugin_opts),
        ProxySettings::ShadowsocksR {
            method,
            password,
            protocol,
            protocol_param,
            obfs,
            obfs_param,
        } => ClashProxy::ShadowsocksR {
            common,
            cipher: method.clone(),
            password: password.clone(),
            protocol: protocol.clone(),
            obfs: obfs.clone(),
            protocol_param: protocol_param.clone(),
            obfs_param: obfs_param.clone(),
        },
        ProxySettings::Http { username, password } => {
            let mut common = common;
            common.tls = node.tls.then_some(true);
            ClashProxy::Http {
                common,
                username: username.clone(),
                password: password.clone(),
            }
        }
    };

    proxy.set_skip_cert_verify(node.skip_cert_verify);
    proxy
}

fn build_common_proxy_options(node: &Proxy) -> CommonProxyOptions {
    let mut common = CommonProxyOptions::new(
        node.display_name().to_string(),
        node.hostname.clone(),
        node.port,
    );
    if node.tls {
        common.alpn = node.alpn.clone();
        common.client_fingerprint = node.fingerprint.clone();
    }
    common
}

/// `network` value plus websocket / gRPC options for the node's transport.
fn transport_options(node: &Proxy) -> (Option<String>, Option<WsOpts>, Option<GrpcOpts>) {
    match node.transport {
        Transport::Tcp => (None, None, None),
        Transport::WebSocket => (
            Some(Transport::WebSocket.clash_network().to_string()),
            Some(ws_opts(node)),
            None,
        ),
        Transport::Grpc => (
            Some(Transport::Grpc.clash_network().to_string()),
            None,
            Some(GrpcOpts {
                grpc_service_name: node.grpc_service_name.clone().unwrap_or_default(),
            }),
        ),
        Transport::Http2 => (Some(Transport::Http2.clash_network().to_string()), None, None),
    }
}

fn ws_opts(node: &Proxy) -> WsOpts {
    WsOpts {
        path: node
            .ws_path
            .clone()
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| "/".to_string()),
        headers: WsHeaders {
            host: node.effective_ws_host().to_string(),
        },
        v2ray_http_upgrade: node.http_upgrade.then_some(true),
    }
}

/// Server name, only meaningful when TLS is on.
fn servername(node: &Proxy) -> Option<String> {
    node.tls
        .then(|| node.effective_server_name().to_string())
}

fn handle_vmess(
    node: &Proxy,
    mut common: CommonProxyOptions,
    uuid: &str,
    alter_id: u32,
    cipher: &str,
) -> ClashProxy {
    common.udp = Some(true);
    common.tls = Some(node.tls);
    let (network, ws_opts, grpc_opts) = transport_options(node);

    ClashProxy::VMess {
        common,
        uuid: uuid.to_string(),
        alter_id,
        cipher: cipher.to_string(),
        servername: servername(node),
        network,
        ws_opts,
        grpc_opts,
    }
}

fn handle_vless(
    node: &Proxy,
    mut common: CommonProxyOptions,
    uuid: &str,
    flow: &Option<String>,
) -> ClashProxy {
    common.udp = Some(true);
    common.tls = Some(node.tls);
    let (network, ws_opts, grpc_opts) = transport_options(node);

    let reality_opts = node.reality.as_ref().map(|reality| RealityOpts {
        public_key: reality.public_key.clone(),
        short_id: reality.short_id.clone(),
    });
    // REALITY needs a uTLS fingerprint
    if reality_opts.is_some() && common.client_fingerprint.is_none() {
        common.client_fingerprint = Some("chrome".to_string());
    }

    ClashProxy::Vless {
        common,
        uuid: uuid.to_string(),
        flow: flow.clone(),
        servername: servername(node),
        reality_opts,
        network,
        ws_opts,
        grpc_opts,
    }
}

fn handle_trojan(node: &Proxy, mut common: CommonProxyOptions, password: &str) -> ClashProxy {
    common.udp = Some(true);
    common.sni = Some(node.effective_server_name().to_string());
    let (network, ws_opts, grpc_opts) = transport_options(node);

    ClashProxy::Trojan {
        common,
        password: password.to_string(),
        network,
        ws_opts,
        grpc_opts,
    }
}

/// Look up `key=value` in a `;` separated plugin option string.
fn plugin_arg(opts: &str, key: &str) -> Option<String> {
    opts.split(';').find_map(|item| {
        let (k, v) = item.split_once('=')?;
        (k.trim() == key && !v.trim().is_empty()).then(|| v.trim().to_string())
    })
}

fn handle_shadowsocks(
    node: &Proxy,
    mut common: CommonProxyOptions,
    method: &str,
    password: &str,
    plugin: &Option<String>,
    plugin_opts: &Option<String>,
) -> ClashProxy {
    common.udp = Some(true);
    if node.tls {
        common.tls = Some(true);
        common.sni = Some(node.effective_server_name().to_string());
    }
    let raw_opts = plugin_opts.as_deref().unwrap_or("");

    let (plugin, plugin_opts) = match plugin.as_deref() {
        Some("simple-obfs" | "obfs-local" | "obfs") => (
            Some("obfs".to_string()),
            Some(PluginOpts {
                mode: plugin_arg(raw_opts, "obfs").unwrap_or_else(|| "http".to_string()),
                host: plugin_arg(raw_opts, "obfs-host"),
                path: None,
                tls: None,
                mux: None,
                skip_cert_verify: None,
            }),
        ),
        Some(name) if !is_v2ray_plugin(name) => {
            log::warn!(
                "Shadowsocks plugin `{}` of `{}` has no Clash equivalent, dropping it",
                name,
                node.display_name()
            );
            (None, None)
        }
        Some(name)
            if plugin_arg(raw_opts, "mode").is_some_and(|mode| mode != "websocket") =>
        {
            log::warn!(
                "Only websocket mode of `{}` is supported, dropping the plugin of `{}`",
                name,
                node.display_name()
            );
            (None, None)
        }
        // v2ray-plugin by name, or websocket/tls expressed through query keys
        requested
            if requested.is_some() || node.tls || node.transport == Transport::WebSocket =>
        {
            (
                Some("v2ray-plugin".to_string()),
                Some(PluginOpts {
                    mode: "websocket".to_string(),
                    host: Some(
                        node.ws_host
                            .as_deref()
                            .or(node.server_name.as_deref())
                            .unwrap_or(&node.hostname)
                            .to_string(),
                    ),
                    path: Some(node.ws_path.clone().unwrap_or_else(|| "/".to_string())),
                    tls: Some(node.tls),
                    mux: Some(false),
                    skip_cert_verify: Some(node.skip_cert_verify),
                }),
            )
        }
        _ => (None, None),
    };

    ClashProxy::Shadowsocks {
        common,
        cipher: method.to_string(),
        password: password.to_string(),
        plugin,
        plugin_opts,
    }
}

fn is_v2ray_plugin(name: &str) -> bool {
    matches!(name, "v2ray-plugin" | "xray-plugin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RealityOptions;

    fn vmess_node() -> Proxy {
        Proxy::new(
            ProxySettings::VMess {
                uuid: "b831381d-6324-4d53-ad4f-8cda48b30811".to_string(),
                alter_id: 0,
                cipher: "auto".to_string(),
            },
            "vm",
            "example.com",
            443,
        )
    }

    #[test]
    fn test_vmess_ws_defaults() {
        let mut node = vmess_node();
        node.tls = true;
        node.set_transport(Transport::WebSocket, true);

        match proxy_to_clash(&node) {
            ClashProxy::VMess {
                common,
                servername,
                network,
                ws_opts,
                grpc_opts,
                ..
            } => {
                assert_eq!(common.udp, Some(true));
                assert_eq!(common.tls, Some(true));
                assert_eq!(common.skip_cert_verify, Some(true));
                assert_eq!(servername.as_deref(), Some("example.com"));
                assert_eq!(network.as_deref(), Some("ws"));
                let ws_opts = ws_opts.unwrap();
                assert_eq!(ws_opts.path, "/");
                assert_eq!(ws_opts.headers.host, "example.com");
                assert_eq!(ws_opts.v2ray_http_upgrade, Some(true));
                assert!(grpc_opts.is_none());
            }
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_vmess_without_tls_has_no_servername() {
        let mut node = vmess_node();
        node.server_name = Some("sni.example.com".to_string());

        match proxy_to_clash(&node) {
            ClashProxy::VMess {
                servername,
                network,
                ..
            } => {
                assert_eq!(servername, None);
                assert_eq!(network, None);
            }
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_vless_reality_grpc() {
        let mut node = Proxy::new(
            ProxySettings::Vless {
                uuid: "id".to_string(),
                flow: Some("xtls-rprx-vision".to_string()),
            },
            "r",
            "example.com",
            443,
        );
        node.tls = true;
        node.set_transport(Transport::Grpc, false);
        node.grpc_service_name = Some("svc".to_string());
        node.reality = Some(RealityOptions {
            public_key: "pbk".to_string(),
            short_id: Some("ab".to_string()),
        });

        let value = serde_yaml::to_value(proxy_to_clash(&node)).unwrap();
        assert_eq!(value["type"], "vless");
        assert_eq!(value["flow"], "xtls-rprx-vision");
        assert_eq!(value["network"], "grpc");
        assert_eq!(value["grpc-opts"]["grpc-service-name"], "svc");
        assert_eq!(value["reality-opts"]["public-key"], "pbk");
        assert_eq!(value["client-fingerprint"], "chrome");
    }

    #[test]
    fn test_trojan_always_has_sni() {
        let mut node = Proxy::new(
            ProxySettings::Trojan {
                password: "pw".to_string(),
            },
            "t",
            "example.com",
            443,
        );
        node.tls = true;

        let proxy = proxy_to_clash(&node);
        assert_eq!(proxy.common().sni.as_deref(), Some("example.com"));
        assert_eq!(proxy.common().tls, None);
    }

    #[test]
    fn test_plain_shadowsocks_has_no_plugin() {
        let node = Proxy::new(
            ProxySettings::Shadowsocks {
                method: "aes-256-gcm".to_string(),
                password: "secret".to_string(),
                plugin: None,
                plugin_opts: None,
            },
            "Home",
            "1.2.3.4",
            8388,
        );

        match proxy_to_clash(&node) {
            ClashProxy::Shadowsocks {
                cipher,
                password,
                plugin,
                plugin_opts,
                ..
            } => {
                assert_eq!(cipher, "aes-256-gcm");
                assert_eq!(password, "secret");
                assert_eq!(plugin, None);
                assert_eq!(plugin_opts, None);
            }
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_shadowsocks_websocket_uses_v2ray_plugin() {
        let mut node = Proxy::new(
            ProxySettings::Shadowsocks {
                method: "aes-128-gcm".to_string(),
                password: "pw".to_string(),
                plugin: Some("v2ray-plugin".to_string()),
                plugin_opts: Some("mode=websocket;tls;host=cdn.example.com;path=/ss".to_string()),
            },
            "ss",
            "example.com",
            443,
        );
        node.tls = true;
        node.set_transport(Transport::WebSocket, false);
        node.ws_host = Some("cdn.example.com".to_string());
        node.ws_path = Some("/ss".to_string());

        let value = serde_yaml::to_value(proxy_to_clash(&node)).unwrap();
        assert_eq!(value["plugin"], "v2ray-plugin");
        assert_eq!(value["plugin-opts"]["mode"], "websocket");
        assert_eq!(value["plugin-opts"]["host"], "cdn.example.com");
        assert_eq!(value["plugin-opts"]["path"], "/ss");
        assert_eq!(value["plugin-opts"]["tls"], true);
    }

    #[test]
    fn test_shadowsocks_tls_without_websocket() {
        let mut node = Proxy::new(
            ProxySettings::Shadowsocks {
                method: "aes-128-gcm".to_string(),
                password: "pw".to_string(),
                plugin: None,
                plugin_opts: None,
            },
            "s",
            "example.com",
            443,
        );
        node.tls = true;
        node.server_name = Some("front.example.com".to_string());

        let value = serde_yaml::to_value(proxy_to_clash(&node)).unwrap();
        assert_eq!(value["tls"], true);
        assert_eq!(value["sni"], "front.example.com");
        assert_eq!(value["plugin"], "v2ray-plugin");
        assert_eq!(value["plugin-opts"]["mode"], "websocket");
        assert_eq!(value["plugin-opts"]["host"], "front.example.com");
        assert_eq!(value["plugin-opts"]["path"], "/");
        assert_eq!(value["plugin-opts"]["tls"], true);
    }

    #[test]
    fn test_shadowsocks_v2ray_plugin_quic_mode_is_dropped() {
        let node = Proxy::new(
            ProxySettings::Shadowsocks {
                method: "aes-128-gcm".to_string(),
                password: "pw".to_string(),
                plugin: Some("v2ray-plugin".to_string()),
                plugin_opts: Some("mode=quic;host=example.com".to_string()),
            },
            "s",
            "example.com",
            443,
        );

        match proxy_to_clash(&node) {
            ClashProxy::Shadowsocks {
                plugin,
                plugin_opts,
                ..
            } => {
                assert_eq!(plugin, None);
                assert_eq!(plugin_opts, None);
            }
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_shadowsocks_simple_obfs() {
        let node = Proxy::new(
            ProxySettings::Shadowsocks {
                method: "aes-128-gcm".to_string(),
                password: "pw".to_string(),
                plugin: Some("obfs-local".to_string()),
                plugin_opts: Some("obfs=tls;obfs-host=www.bing.com".to_string()),
            },
            "ss",
            "example.com",
            443,
        );

        match proxy_to_clash(&node) {
            ClashProxy::Shadowsocks {
                plugin,
                plugin_opts,
                ..
            } => {
                assert_eq!(plugin.as_deref(), Some("obfs"));
                let opts = plugin_opts.unwrap();
                assert_eq!(opts.mode, "tls");
                assert_eq!(opts.host.as_deref(), Some("www.bing.com"));
            }
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_http_proxy_keeps_credentials() {
        let mut node = Proxy::new(
            ProxySettings::Http {
                username: Some("user".to_string()),
                password: Some("pass".to_string()),
            },
            "h",
            "proxy.example.com",
            3128,
        );
        node.unique_name = Some("h [2]".to_string());

        let value = serde_yaml::to_value(proxy_to_clash(&node)).unwrap();
        assert_eq!(value["type"], "http");
        assert_eq!(value["name"], "h [2]");
        assert_eq!(value["username"], "user");
        assert_eq!(value["password"], "pass");
    }
}
