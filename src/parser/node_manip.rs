use log::{debug, info};

use crate::models::{CustomServer, Proxy, ProxyType, Transport};

/// Point every node at a custom front server (a "bug host").
///
/// The server address of each node is replaced by `custom.value`. The TLS
/// server name and websocket `Host` header keep pointing at the original
/// server; in wildcard mode they are prefixed with the custom value instead,
/// giving `<value>.<original>`.
pub fn apply_custom_server(nodes: &mut [Proxy], custom: &CustomServer) {
    let value = custom.value.trim();
    if value.is_empty() {
        return;
    }

    info!(
        "Rewriting {} node(s) to custom server `{}`{}",
        nodes.len(),
        value,
        if custom.wildcard { " (wildcard)" } else { "" }
    );

    for node in nodes.iter_mut() {
        rewrite_node(node, value, custom.wildcard);
    }
}

fn rewrite_node(node: &mut Proxy, value: &str, wildcard: bool) {
    // Resolve against the original address before it is overwritten
    let original_sni = node.effective_server_name().to_string();
    let original_ws_host = node.effective_ws_host().to_string();

    debug!(
        "Node `{}`: server {} -> {}",
        node.remark, node.hostname, value
    );
    node.hostname = value.to_string();

    let sni_protocol = matches!(
        node.proxy_type(),
        ProxyType::VMess | ProxyType::Vless | ProxyType::Trojan
    );
    let ws_host_target =
        node.transport == Transport::WebSocket || node.proxy_type() == ProxyType::Shadowsocks;

    if wildcard {
        if sni_protocol || node.transport == Transport::Grpc {
            node.server_name = Some(format!("{}.{}", value, original_sni));
        }
        if ws_host_target {
            node.ws_host = Some(format!("{}.{}", value, original_ws_host));
        }
    } else {
        if sni_protocol || node.transport == Transport::Grpc {
            node.server_name = Some(original_sni);
        }
        if ws_host_target {
            node.ws_host = Some(original_ws_host);
        }
    }
}
