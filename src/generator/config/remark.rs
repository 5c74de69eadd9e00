//! Remark processing utilities
//!
//! This module assigns every node a name that is unique within one document.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::models::Proxy;

lazy_static! {
    static ref NUMBERED_REMARK: Regex = Regex::new(r"^(.+?)\s*\[(\d+)\]$").unwrap();
}

/// Next candidate for a name that is already taken.
///
/// `Name [n]` becomes `Name [n+1]`, anything else gets ` [2]` appended.
fn next_candidate(name: &str) -> String {
    if let Some(caps) = NUMBERED_REMARK.captures(name) {
        if let Ok(n) = caps[2].parse::<u64>() {
            if let Some(next) = n.checked_add(1) {
                return format!("{} [{}]", &caps[1], next);
            }
        }
    }
    format!("{} [2]", name)
}

/// Assign `unique_name` to every node, in input order.
///
/// The first node carrying a remark keeps it unchanged; later collisions are
/// numbered. The set of taken names only lives for this call, so the same
/// input always yields the same names.
pub fn dedup_remarks(nodes: &mut [Proxy]) {
    let mut used: HashSet<String> = HashSet::with_capacity(nodes.len());

    for node in nodes.iter_mut() {
        let mut candidate = node.remark.clone();
        while used.contains(&candidate) {
            candidate = next_candidate(&candidate);
        }
        if candidate != node.remark {
            log::debug!("Renamed duplicate remark `{}` to `{}`", node.remark, candidate);
        }
        used.insert(candidate.clone());
        node.unique_name = Some(candidate);
    }
}
