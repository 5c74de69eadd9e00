use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// Represents a complete Clash configuration output
///
/// Only `proxies` is always present; the remaining sections are filled in
/// for full configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashYamlOutput {
    // General settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socks_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_lan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_controller: Option<String>,

    // DNS settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<ClashDns>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_providers: Option<LinkedHashMap<String, RuleProvider>>,

    #[serde(default)]
    pub proxies: Vec<ClashProxy>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proxy_groups: Vec<ClashProxyGroup>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
}

/// DNS configuration for Clash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashDns {
    pub enable: bool,
    pub listen: String,
    pub enhanced_mode: String,
    pub nameserver: Vec<String>,
    pub fallback: Vec<String>,
}

/// A remotely hosted rule list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub behavior: String,
    pub url: String,
    pub path: String,
    pub interval: u32,
}

/// Common proxy options that can be used across different proxy types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommonProxyOptions {
    pub name: String,
    pub server: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alpn: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_fingerprint: Option<String>,
}

impl CommonProxyOptions {
    /// Create a new CommonProxyOptions with default values
    pub fn new(name: String, server: String, port: u16) -> Self {
        Self {
            name,
            server,
            port,
            udp: None,
            tls: None,
            skip_cert_verify: None,
            sni: None,
            alpn: Vec::new(),
            client_fingerprint: None,
        }
    }
}

/// Websocket `Host` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsHeaders {
    #[serde(rename = "Host")]
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WsOpts {
    pub path: String,
    pub headers: WsHeaders,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2ray_http_upgrade: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GrpcOpts {
    pub grpc_service_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RealityOpts {
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
}

/// Options of the `obfs` and `v2ray-plugin` Shadowsocks plugins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginOpts {
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mux: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
}

/// Represents a single proxy in Clash configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "kebab-case")]
pub enum ClashProxy {
    #[serde(rename = "vmess")]
    VMess {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(rename = "alterId")]
        alter_id: u32,
        cipher: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        servername: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        network: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ws_opts: Option<WsOpts>,
        #[serde(skip_serializing_if = "Option::is_none")]
        grpc_opts: Option<GrpcOpts>,
    },
    #[serde(rename = "vless")]
    Vless {
        #[serde(flatten)]
        common: CommonProxyOptions,
        uuid: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        flow: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        servername: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reality_opts: Option<RealityOpts>,
        #[serde(skip_serializing_if = "Option::is_none")]
        network: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ws_opts: Option<WsOpts>,
        #[serde(skip_serializing_if = "Option::is_none")]
        grpc_opts: Option<GrpcOpts>,
    },
    #[serde(rename = "trojan")]
    Trojan {
        #[serde(flatten)]
        common: CommonProxyOptions,
        password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        network: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ws_opts: Option<WsOpts>,
        #[serde(skip_serializing_if = "Option::is_none")]
        grpc_opts: Option<GrpcOpts>,
    },
    #[serde(rename = "ss")]
    Shadowsocks {
        #[serde(flatten)]
        common: CommonProxyOptions,
        cipher: String,
        password: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        plugin: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        plugin_opts: Option<PluginOpts>,
    },
    #[serde(rename = "ssr")]
    ShadowsocksR {
        #[serde(flatten)]
        common: CommonProxyOptions,
        cipher: String,
        password: String,
        protocol: String,
        obfs: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        protocol_param: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        obfs_param: Option<String>,
    },
    #[serde(rename = "http")]
    Http {
        #[serde(flatten)]
        common: CommonProxyOptions,
        #[serde(skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },
}

/// Trait for common operations on all ClashProxy variants
pub trait ClashProxyCommon {
    /// Get a reference to the common options
    fn common(&self) -> &CommonProxyOptions;

    /// Get a mutable reference to the common options
    fn common_mut(&mut self) -> &mut CommonProxyOptions;

    fn name(&self) -> &str {
        &self.common().name
    }

    /// Set a UDP option
    fn set_udp(&mut self, value: bool) {
        self.common_mut().udp = Some(value);
    }

    /// Set TLS option
    fn set_tls(&mut self, value: bool) {
        self.common_mut().tls = Some(value);
    }

    /// Set skip certificate verification option
    fn set_skip_cert_verify(&mut self, value: bool) {
        self.common_mut().skip_cert_verify = Some(value);
    }
}

impl ClashProxyCommon for ClashProxy {
    fn common(&self) -> &CommonProxyOptions {
        match self {
            ClashProxy::VMess { common, .. } => common,
            ClashProxy::Vless { common, .. } => common,
            ClashProxy::Trojan { common, .. } => common,
            ClashProxy::Shadowsocks { common, .. } => common,
            ClashProxy::ShadowsocksR { common, .. } => common,
            ClashProxy::Http { common, .. } => common,
        }
    }

    fn common_mut(&mut self) -> &mut CommonProxyOptions {
        match self {
            ClashProxy::VMess { common, .. } => common,
            ClashProxy::Vless { common, .. } => common,
            ClashProxy::Trojan { common, .. } => common,
            ClashProxy::Shadowsocks { common, .. } => common,
            ClashProxy::ShadowsocksR { common, .. } => common,
            ClashProxy::Http { common, .. } => common,
        }
    }
}

/// Represents a proxy group in Clash configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClashProxyGroup {
    #[serde(rename = "select")]
    Select { name: String, proxies: Vec<String> },
    #[serde(rename = "url-test")]
    UrlTest {
        name: String,
        url: String,
        interval: u32,
        tolerance: u32,
        proxies: Vec<String>,
    },
    #[serde(rename = "load-balance")]
    LoadBalance {
        name: String,
        url: String,
        interval: u32,
        strategy: String,
        proxies: Vec<String>,
    },
    #[serde(rename = "fallback")]
    Fallback {
        name: String,
        url: String,
        interval: u32,
        proxies: Vec<String>,
    },
}

impl ClashProxyGroup {
    pub fn name(&self) -> &str {
        match self {
            ClashProxyGroup::Select { name, .. }
            | ClashProxyGroup::UrlTest { name, .. }
            | ClashProxyGroup::LoadBalance { name, .. }
            | ClashProxyGroup::Fallback { name, .. } => name,
        }
    }

    pub fn proxies(&self) -> &[String] {
        match self {
            ClashProxyGroup::Select { proxies, .. }
            | ClashProxyGroup::UrlTest { proxies, .. }
            | ClashProxyGroup::LoadBalance { proxies, .. }
            | ClashProxyGroup::Fallback { proxies, .. } => proxies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_proxy_operations() {
        let mut proxy = ClashProxy::Trojan {
            common: CommonProxyOptions::new("example".to_string(), "example.com".to_string(), 443),
            password: "secret".to_string(),
            network: None,
            ws_opts: None,
            grpc_opts: None,
        };

        proxy.set_udp(true);
        proxy.set_skip_cert_verify(true);

        assert_eq!(proxy.name(), "example");
        assert_eq!(proxy.common().udp, Some(true));
        assert_eq!(proxy.common().skip_cert_verify, Some(true));
    }

    #[test]
    fn test_proxy_serializes_with_kebab_case_fields() {
        let mut common =
            CommonProxyOptions::new("ws node".to_string(), "example.com".to_string(), 443);
        common.skip_cert_verify = Some(true);
        let proxy = ClashProxy::Vless {
            common,
            uuid: "id".to_string(),
            flow: None,
            servername: None,
            reality_opts: None,
            network: Some("ws".to_string()),
            ws_opts: Some(WsOpts {
                path: "/".to_string(),
                headers: WsHeaders {
                    host: "cdn.example.com".to_string(),
                },
                v2ray_http_upgrade: Some(true),
            }),
            grpc_opts: None,
        };

        let value = serde_yaml::to_value(&proxy).unwrap();
        assert_eq!(value["type"], "vless");
        assert_eq!(value["skip-cert-verify"], true);
        assert_eq!(value["ws-opts"]["headers"]["Host"], "cdn.example.com");
        assert_eq!(value["ws-opts"]["v2ray-http-upgrade"], true);
        assert!(value.get("grpc-opts").is_none());
        assert!(value.get("alpn").is_none());
    }

    #[test]
    fn test_group_serializes_type_tag() {
        let group = ClashProxyGroup::UrlTest {
            name: "BEST-PING".to_string(),
            url: "http://www.gstatic.com/generate_204".to_string(),
            interval: 300,
            tolerance: 50,
            proxies: vec!["a".to_string()],
        };
        let value = serde_yaml::to_value(&group).unwrap();
        assert_eq!(value["type"], "url-test");
        assert_eq!(value["tolerance"], 50);
        assert_eq!(group.proxies(), ["a".to_string()]);
    }
}
