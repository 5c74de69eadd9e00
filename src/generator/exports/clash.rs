use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;

use crate::constants::clash::*;
use crate::error::ConvertError;
use crate::generator::config::group::group_generate;
use crate::generator::config::remark::dedup_remarks;
use crate::generator::config::ruleset::{rule_providers, rules};
use crate::generator::exports::proxy_to_clash::proxy_to_clash;
use crate::generator::yaml::clash_output::{ClashDns, ClashProxyCommon, ClashYamlOutput};
use crate::generator::yaml::emit::to_clash_yaml;
use crate::models::{Options, Proxy};

/// Convert nodes to a Clash configuration, stamped with the current time.
///
/// See [`generate_clash_config_at`].
pub fn generate_clash_config(
    nodes: &mut [Proxy],
    options: &Options,
) -> Result<String, ConvertError> {
    generate_clash_config_at(nodes, options, Utc::now())
}

/// Convert nodes to a Clash configuration
///
/// Names are deduplicated first (writing each node's `unique_name`), then
/// the document is assembled section by section and serialized once, with
/// `name` leading every entry and list items indented under their key.
///
/// # Arguments
/// * `nodes` - Parsed nodes in input order
/// * `options` - Feature toggles; `all_groups` is folded in here
/// * `generated_at` - Timestamp written into the header comment
pub fn generate_clash_config_at(
    nodes: &mut [Proxy],
    options: &Options,
    generated_at: DateTime<Utc>,
) -> Result<String, ConvertError> {
    let options = options.resolved();
    dedup_remarks(nodes);

    let yaml = build_clash_output(nodes, &options);
    let body = to_clash_yaml(&yaml)?;

    debug!(
        "Generated {} configuration with {} proxies",
        if options.is_full_config { "full" } else { "minimal" },
        yaml.proxies.len()
    );

    Ok(format!(
        "{}\n{}\n# Date: {}\n{}",
        HEADER_TITLE,
        HEADER_GENERATOR,
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        body
    ))
}

/// Assemble the document tree for already deduplicated nodes.
pub fn build_clash_output(nodes: &[Proxy], options: &Options) -> ClashYamlOutput {
    let proxies: Vec<_> = nodes.iter().map(proxy_to_clash).collect();

    if !options.is_full_config {
        return ClashYamlOutput {
            proxies,
            ..Default::default()
        };
    }

    let proxy_names: Vec<String> = proxies
        .iter()
        .map(|proxy| proxy.name().to_string())
        .collect();

    ClashYamlOutput {
        port: Some(HTTP_PORT),
        socks_port: Some(SOCKS_PORT),
        allow_lan: Some(true),
        mode: Some(MODE.to_string()),
        log_level: Some(LOG_LEVEL.to_string()),
        external_controller: Some(EXTERNAL_CONTROLLER.to_string()),
        dns: Some(ClashDns {
            enable: true,
            listen: DNS_LISTEN.to_string(),
            enhanced_mode: if options.use_fake_ip {
                DNS_MODE_FAKE_IP
            } else {
                DNS_MODE_REDIR_HOST
            }
            .to_string(),
            nameserver: DNS_NAMESERVERS.iter().map(|s| s.to_string()).collect(),
            fallback: DNS_FALLBACK.iter().map(|s| s.to_string()).collect(),
        }),
        rule_providers: rule_providers(options),
        proxy_groups: group_generate(&proxy_names, options),
        rules: rules(options),
        proxies,
    }
}
