//! Rule providers and routing rules of a full configuration.

use linked_hash_map::LinkedHashMap;

use crate::constants::clash::*;
use crate::generator::yaml::clash_output::RuleProvider;
use crate::models::Options;

fn domain_provider(url: &str, path: &str) -> RuleProvider {
    RuleProvider {
        provider_type: "http".to_string(),
        behavior: "domain".to_string(),
        url: url.to_string(),
        path: path.to_string(),
        interval: PROVIDER_INTERVAL,
    }
}

/// Rule providers for the enabled blocklists, `None` when none is enabled.
pub fn rule_providers(options: &Options) -> Option<LinkedHashMap<String, RuleProvider>> {
    let mut providers = LinkedHashMap::new();
    if options.ads_block {
        providers.insert(
            ADS_PROVIDER.to_string(),
            domain_provider(ADS_PROVIDER_URL, ADS_PROVIDER_PATH),
        );
    }
    if options.porn_block {
        providers.insert(
            PORN_PROVIDER.to_string(),
            domain_provider(PORN_PROVIDER_URL, PORN_PROVIDER_PATH),
        );
    }

    (!providers.is_empty()).then_some(providers)
}

/// Routing rules: blocklist rule-sets, private networks direct, then
/// everything else through the main group.
pub fn rules(options: &Options) -> Vec<String> {
    let mut rules = Vec::new();
    if options.ads_block {
        rules.push(format!("RULE-SET,{},{}", ADS_PROVIDER, ADS_GROUP));
    }
    if options.porn_block {
        rules.push(format!("RULE-SET,{},{}", PORN_PROVIDER, PORN_GROUP));
    }
    rules.extend(
        PRIVATE_CIDRS
            .iter()
            .map(|cidr| format!("IP-CIDR,{},{}", cidr, DIRECT)),
    );
    rules.push(format!("MATCH,{}", MAIN_GROUP));
    rules
}
