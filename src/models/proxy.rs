//! Proxy model definitions
//!
//! Contains the normalized descriptor every share-link dialect is collapsed into.

/// Represents the type of a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyType {
    VMess,
    Vless,
    Trojan,
    Shadowsocks,
    ShadowsocksR,
    Http,
}

impl ProxyType {
    /// Human-readable protocol name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::VMess => "VMess",
            ProxyType::Vless => "VLESS",
            ProxyType::Trojan => "Trojan",
            ProxyType::Shadowsocks => "SS",
            ProxyType::ShadowsocksR => "SSR",
            ProxyType::Http => "HTTP",
        }
    }

    /// Remark used when a link carries no usable name.
    pub fn default_remark(self) -> String {
        format!("{} Server", self.as_str())
    }
}

/// Stream framing used to carry the proxied traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transport {
    #[default]
    Tcp,
    WebSocket,
    Grpc,
    Http2,
}

impl Transport {
    /// Map a link's `net`/`type` value to a transport.
    ///
    /// Unknown values fall back to TCP; `httpupgrade` is reported as
    /// WebSocket, the caller is responsible for raising the upgrade flag.
    pub fn from_link_value(value: &str) -> Transport {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "tcp" | "raw" => Transport::Tcp,
            "ws" | "websocket" | "httpupgrade" => Transport::WebSocket,
            "grpc" | "gun" => Transport::Grpc,
            "h2" | "http" => Transport::Http2,
            other => {
                log::warn!("Unknown transport `{}`, falling back to tcp", other);
                Transport::Tcp
            }
        }
    }

    /// The value Clash expects in `network:`.
    pub fn clash_network(self) -> &'static str {
        match self {
            Transport::Tcp => "tcp",
            Transport::WebSocket => "ws",
            Transport::Grpc => "grpc",
            Transport::Http2 => "h2",
        }
    }
}

/// REALITY handshake parameters carried by some VLESS links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealityOptions {
    pub public_key: String,
    pub short_id: Option<String>,
}

/// Protocol specific part of a proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxySettings {
    VMess {
        uuid: String,
        alter_id: u32,
        cipher: String,
    },
    Vless {
        uuid: String,
        flow: Option<String>,
    },
    Trojan {
        password: String,
    },
    Shadowsocks {
        method: String,
        password: String,
        plugin: Option<String>,
        /// Plugin options in the format of `key1=value1;key2=value2`
        plugin_opts: Option<String>,
    },
    ShadowsocksR {
        method: String,
        password: String,
        protocol: String,
        protocol_param: Option<String>,
        obfs: String,
        obfs_param: Option<String>,
    },
    Http {
        username: Option<String>,
        password: Option<String>,
    },
}

impl ProxySettings {
    pub fn proxy_type(&self) -> ProxyType {
        match self {
            ProxySettings::VMess { .. } => ProxyType::VMess,
            ProxySettings::Vless { .. } => ProxyType::Vless,
            ProxySettings::Trojan { .. } => ProxyType::Trojan,
            ProxySettings::Shadowsocks { .. } => ProxyType::Shadowsocks,
            ProxySettings::ShadowsocksR { .. } => ProxyType::ShadowsocksR,
            ProxySettings::Http { .. } => ProxyType::Http,
        }
    }

    /// The secret that authenticates against the server, if any.
    pub fn credential(&self) -> Option<&str> {
        match self {
            ProxySettings::VMess { uuid, .. } | ProxySettings::Vless { uuid, .. } => Some(uuid),
            ProxySettings::Trojan { password }
            | ProxySettings::Shadowsocks { password, .. }
            | ProxySettings::ShadowsocksR { password, .. } => Some(password),
            ProxySettings::Http { password, .. } => password.as_deref(),
        }
    }
}

/// Represents one proxy endpoint decoded from a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proxy {
    pub settings: ProxySettings,
    pub remark: String,
    pub hostname: String,
    pub port: u16,

    pub transport: Transport,
    pub http_upgrade: bool,
    pub tls: bool,
    pub server_name: Option<String>,
    pub alpn: Vec<String>,
    pub fingerprint: Option<String>,
    pub reality: Option<RealityOptions>,
    pub skip_cert_verify: bool,

    pub ws_path: Option<String>,
    pub ws_host: Option<String>,
    pub grpc_service_name: Option<String>,

    /// Assigned by the generator once all names are known.
    pub unique_name: Option<String>,
}

impl Proxy {
    /// Create a proxy with every optional field unset.
    ///
    /// An empty remark is replaced by the protocol placeholder so the
    /// remark is never blank.
    pub fn new(settings: ProxySettings, remark: &str, hostname: &str, port: u16) -> Self {
        let remark = if remark.trim().is_empty() {
            settings.proxy_type().default_remark()
        } else {
            remark.to_string()
        };

        Proxy {
            settings,
            remark,
            hostname: hostname.to_string(),
            port,
            transport: Transport::Tcp,
            http_upgrade: false,
            tls: false,
            server_name: None,
            alpn: Vec::new(),
            fingerprint: None,
            reality: None,
            skip_cert_verify: true,
            ws_path: None,
            ws_host: None,
            grpc_service_name: None,
            unique_name: None,
        }
    }

    pub fn proxy_type(&self) -> ProxyType {
        self.settings.proxy_type()
    }

    /// Set the transport, honouring the HTTP-upgrade override.
    pub fn set_transport(&mut self, transport: Transport, http_upgrade: bool) {
        self.http_upgrade = http_upgrade;
        self.transport = if http_upgrade {
            Transport::WebSocket
        } else {
            transport
        };
    }

    /// Name used in the generated document.
    pub fn display_name(&self) -> &str {
        self.unique_name.as_deref().unwrap_or(&self.remark)
    }

    /// Server name for TLS, falling back to the server address.
    pub fn effective_server_name(&self) -> &str {
        self.server_name.as_deref().unwrap_or(&self.hostname)
    }

    /// Websocket `Host` header, falling back to the server address.
    pub fn effective_ws_host(&self) -> &str {
        self.ws_host.as_deref().unwrap_or(&self.hostname)
    }
}
