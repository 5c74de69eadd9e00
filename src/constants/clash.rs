// Fixed values of the generated Clash document

pub const HEADER_TITLE: &str = "# Clash Configuration";
pub const HEADER_GENERATOR: &str = "# Generated by V2Ray to Clash Converter";

// General settings
pub const HTTP_PORT: u16 = 7890;
pub const SOCKS_PORT: u16 = 7891;
pub const MODE: &str = "rule";
pub const LOG_LEVEL: &str = "info";
pub const EXTERNAL_CONTROLLER: &str = "127.0.0.1:9090";

// DNS
pub const DNS_LISTEN: &str = "0.0.0.0:53";
pub const DNS_MODE_FAKE_IP: &str = "fake-ip";
pub const DNS_MODE_REDIR_HOST: &str = "redir-host";
pub const DNS_NAMESERVERS: [&str; 3] = [
    "8.8.8.8",
    "1.1.1.1",
    "https://dns.cloudflare.com/dns-query",
];
pub const DNS_FALLBACK: [&str; 3] = ["1.0.0.1", "8.8.4.4", "https://dns.google/dns-query"];

// Rule providers
pub const ADS_PROVIDER: &str = "⛔ ADS";
pub const ADS_PROVIDER_URL: &str =
    "https://raw.githubusercontent.com/malikshi/open_clash/refs/heads/main/rule_provider/rule_basicads.yaml";
pub const ADS_PROVIDER_PATH: &str = "./rule_provider/rule_basicads.yaml";
pub const PORN_PROVIDER: &str = "🔞 Porn";
pub const PORN_PROVIDER_URL: &str =
    "https://raw.githubusercontent.com/malikshi/open_clash/refs/heads/main/rule_provider/rule_porn.yaml";
pub const PORN_PROVIDER_PATH: &str = "./rule_provider/rule_porn.yaml";
pub const PROVIDER_INTERVAL: u32 = 86400;

// Proxy groups
pub const MAIN_GROUP: &str = "V2RAY-TO-CLASH";
pub const SELECTOR_GROUP: &str = "SELECTOR";
pub const BEST_PING_GROUP: &str = "BEST-PING";
pub const LOAD_BALANCE_GROUP: &str = "LOAD-BALANCE";
pub const FALLBACK_GROUP: &str = "FALLBACK";
pub const ADS_GROUP: &str = "ADS";
pub const PORN_GROUP: &str = "PORN";
pub const DIRECT: &str = "DIRECT";
pub const REJECT: &str = "REJECT";

pub const HEALTH_CHECK_URL: &str = "http://www.gstatic.com/generate_204";
pub const HEALTH_CHECK_INTERVAL: u32 = 300;
pub const URL_TEST_TOLERANCE: u32 = 50;
pub const LOAD_BALANCE_STRATEGY: &str = "round-robin";

// Rules
pub const PRIVATE_CIDRS: [&str; 4] = [
    "192.168.0.0/16",
    "10.0.0.0/8",
    "172.16.0.0/12",
    "127.0.0.0/8",
];
