use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Replacement server ("bug host") applied to every node after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomServer {
    pub value: String,
    /// Prefix the original server name / websocket host instead of keeping them.
    #[serde(default, alias = "isWildcard")]
    pub wildcard: bool,
}

/// Feature toggles controlling what the generated document contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    #[serde(default, alias = "is_full_config")]
    pub is_full_config: bool,
    #[serde(default = "default_true", alias = "use_fake_ip")]
    pub use_fake_ip: bool,
    #[serde(default = "default_true", alias = "best_ping")]
    pub best_ping: bool,
    #[serde(default, alias = "load_balance")]
    pub load_balance: bool,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default, alias = "all_groups")]
    pub all_groups: bool,
    #[serde(default = "default_true", alias = "ads_block")]
    pub ads_block: bool,
    #[serde(default = "default_true", alias = "porn_block")]
    pub porn_block: bool,
    #[serde(default, alias = "skip_failed_links")]
    pub skip_failed_links: bool,
    #[serde(default, alias = "custom_server", skip_serializing_if = "Option::is_none")]
    pub custom_server: Option<CustomServer>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            is_full_config: false,
            use_fake_ip: true,
            best_ping: true,
            load_balance: false,
            fallback: false,
            all_groups: false,
            ads_block: true,
            porn_block: true,
            skip_failed_links: false,
            custom_server: None,
        }
    }
}

impl Options {
    /// Options for a complete configuration rather than a bare proxy list.
    pub fn full() -> Self {
        Options {
            is_full_config: true,
            ..Options::default()
        }
    }

    /// Fold `all_groups` into the individual strategy toggles.
    pub fn resolved(&self) -> Options {
        let mut options = self.clone();
        if options.all_groups {
            options.best_ping = true;
            options.load_balance = true;
            options.fallback = true;
        }
        options
    }

    /// The custom server, if one with a non-empty value is configured.
    pub fn active_custom_server(&self) -> Option<&CustomServer> {
        self.custom_server
            .as_ref()
            .filter(|server| !server.value.trim().is_empty())
    }
}
