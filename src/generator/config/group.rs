//! Group generation utilities
//!
//! This module builds the proxy groups of a full configuration.

use crate::constants::clash::*;
use crate::generator::yaml::clash_output::ClashProxyGroup;
use crate::models::Options;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

/// Names of the strategy groups enabled by `options`, in fixed order.
pub fn strategy_group_names(options: &Options) -> Vec<&'static str> {
    let mut groups = Vec::new();
    if options.best_ping {
        groups.push(BEST_PING_GROUP);
    }
    if options.load_balance {
        groups.push(LOAD_BALANCE_GROUP);
    }
    if options.fallback {
        groups.push(FALLBACK_GROUP);
    }
    groups
}

/// Generates the proxy groups over `proxy_names`
///
/// # Arguments
///
/// * `proxy_names` - Unique proxy names in input order
/// * `options` - Resolved options deciding which groups exist
pub fn group_generate(proxy_names: &[String], options: &Options) -> Vec<ClashProxyGroup> {
    let strategies = strategy_group_names(options);
    let mut groups = Vec::new();

    let mut main = vec![SELECTOR_GROUP];
    main.extend(&strategies);
    main.extend([DIRECT, REJECT]);
    groups.push(ClashProxyGroup::Select {
        name: MAIN_GROUP.to_string(),
        proxies: names(&main),
    });

    let mut selector = names(&[DIRECT, REJECT]);
    selector.extend(proxy_names.iter().cloned());
    groups.push(ClashProxyGroup::Select {
        name: SELECTOR_GROUP.to_string(),
        proxies: selector,
    });

    if options.best_ping {
        groups.push(ClashProxyGroup::UrlTest {
            name: BEST_PING_GROUP.to_string(),
            url: HEALTH_CHECK_URL.to_string(),
            interval: HEALTH_CHECK_INTERVAL,
            tolerance: URL_TEST_TOLERANCE,
            proxies: proxy_names.to_vec(),
        });
    }
    if options.load_balance {
        groups.push(ClashProxyGroup::LoadBalance {
            name: LOAD_BALANCE_GROUP.to_string(),
            url: HEALTH_CHECK_URL.to_string(),
            interval: HEALTH_CHECK_INTERVAL,
            strategy: LOAD_BALANCE_STRATEGY.to_string(),
            proxies: proxy_names.to_vec(),
        });
    }
    if options.fallback {
        groups.push(ClashProxyGroup::Fallback {
            name: FALLBACK_GROUP.to_string(),
            url: HEALTH_CHECK_URL.to_string(),
            interval: HEALTH_CHECK_INTERVAL,
            proxies: proxy_names.to_vec(),
        });
    }

    // Blocking groups point at strategy groups, never at raw proxies
    let mut blocking = vec![REJECT, DIRECT];
    blocking.extend(&strategies);
    if options.ads_block {
        groups.push(ClashProxyGroup::Select {
            name: ADS_GROUP.to_string(),
            proxies: names(&blocking),
        });
    }
    if options.porn_block {
        groups.push(ClashProxyGroup::Select {
            name: PORN_GROUP.to_string(),
            proxies: names(&blocking),
        });
    }

    groups
}
