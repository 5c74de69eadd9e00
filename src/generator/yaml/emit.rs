//! Final text layout of the Clash document.
//!
//! Clash expects every proxy and group entry to open with `name:` and list
//! items indented under their key (`  - name: ...`). `serde_yaml` writes the
//! enum tag first and keeps block sequences flush with their key, so the
//! tree is adjusted before and after serialization.

use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use super::clash_output::ClashYamlOutput;

/// Sections whose entries are named mappings
const NAMED_SECTIONS: [&str; 2] = ["proxies", "proxy-groups"];

lazy_static! {
    static ref BLOCK_SCALAR_HEADER: Regex = Regex::new(r"(?:^|: |- )[|>][1-9]?[-+]?$").unwrap();
}

/// Serialize a Clash document with `name` leading each entry and indented
/// block sequences.
pub fn to_clash_yaml(output: &ClashYamlOutput) -> Result<String, serde_yaml::Error> {
    let mut tree = serde_yaml::to_value(output)?;
    for section in NAMED_SECTIONS {
        if let Some(Value::Sequence(entries)) = tree.get_mut(section) {
            for entry in entries.iter_mut() {
                if let Value::Mapping(map) = entry {
                    hoist_key(map, "name");
                }
            }
        }
    }

    let text = serde_yaml::to_string(&tree)?;
    Ok(indent_sequences(&text))
}

/// Move `key` to the front of `map`, keeping the order of the other entries.
fn hoist_key(map: &mut Mapping, key: &str) {
    let entries = std::mem::take(map);
    let mut rest = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        if k.as_str() == Some(key) {
            map.insert(k, v);
        } else {
            rest.push((k, v));
        }
    }
    for (k, v) in rest {
        map.insert(k, v);
    }
}

fn push_line(out: &mut String, line: &str, extra: usize) {
    if !line.is_empty() {
        out.extend(std::iter::repeat(' ').take(extra));
        out.push_str(line);
    }
    out.push('\n');
}

/// Shift every block sequence two spaces to the right of its parent key.
///
/// Block scalar bodies move with the line that opens them.
pub fn indent_sequences(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    // columns of the `-` markers of the sequences currently open
    let mut sequences: Vec<usize> = Vec::new();
    // key column of an open block scalar
    let mut block_scalar: Option<usize> = None;

    for line in text.lines() {
        let content = line.trim_start_matches(' ');
        let indent = line.len() - content.len();

        if let Some(key_column) = block_scalar {
            if content.is_empty() || indent > key_column {
                push_line(&mut out, line, sequences.len() * 2);
                continue;
            }
            block_scalar = None;
        }

        let is_item = content == "-" || content.starts_with("- ");
        while let Some(&column) = sequences.last() {
            if column > indent || (column == indent && !is_item) {
                sequences.pop();
            } else {
                break;
            }
        }
        if is_item && sequences.last() != Some(&indent) {
            sequences.push(indent);
        }

        if BLOCK_SCALAR_HEADER.is_match(content) {
            let mut key_column = indent;
            let mut rest = content;
            while let Some(stripped) = rest.strip_prefix("- ") {
                key_column += 2;
                rest = stripped;
            }
            block_scalar = Some(key_column);
        }

        push_line(&mut out, line, sequences.len() * 2);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::yaml::clash_output::{ClashProxy, ClashProxyGroup, CommonProxyOptions};

    #[test]
    fn test_indent_nested_sequences() {
        let input = "proxies:\n- name: a\n  alpn:\n  - h2\n  - http/1.1\n  port: 1\n- name: b\nrules:\n- MATCH,X\n";
        let expected = "proxies:\n  - name: a\n    alpn:\n      - h2\n      - http/1.1\n    port: 1\n  - name: b\nrules:\n  - MATCH,X\n";
        assert_eq!(indent_sequences(input), expected);
    }

    #[test]
    fn test_indent_keeps_block_scalar_body() {
        let input = "proxies:\n- name: |-\n    two\n    - lines\n  port: 1\nmode: rule\n";
        let output = indent_sequences(input);
        assert_eq!(
            output,
            "proxies:\n  - name: |-\n      two\n      - lines\n    port: 1\nmode: rule\n"
        );

        let value: Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(value["proxies"][0]["name"], "two\n- lines");
        assert_eq!(value["proxies"][0]["port"], 1);
    }

    #[test]
    fn test_entries_start_with_name() {
        let output = ClashYamlOutput {
            proxies: vec![ClashProxy::Trojan {
                common: CommonProxyOptions::new("T".to_string(), "example.com".to_string(), 443),
                password: "pw".to_string(),
                network: None,
                ws_opts: None,
                grpc_opts: None,
            }],
            proxy_groups: vec![ClashProxyGroup::Select {
                name: "G".to_string(),
                proxies: vec!["T".to_string()],
            }],
            ..Default::default()
        };

        let text = to_clash_yaml(&output).unwrap();
        assert!(text.starts_with("proxies:\n  - name: T\n    type: trojan\n"));
        assert!(text.contains("proxy-groups:\n  - name: G\n    type: select\n    proxies:\n      - T\n"));

        let value: Value = serde_yaml::from_str(&text).unwrap();
        let round_trip: ClashYamlOutput = serde_yaml::from_value(value).unwrap();
        assert_eq!(round_trip.proxies, output.proxies);
        assert_eq!(round_trip.proxy_groups, output.proxy_groups);
    }
}
