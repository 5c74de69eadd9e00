use log::{info, warn};

use crate::error::ConvertError;
use crate::generator::generate_clash_config;
use crate::models::{Options, Proxy};
use crate::parser::{apply_custom_server, explode, explode_sub};

/// Parse every non-blank line of `links_text` into a node, in input order.
///
/// The first failing line aborts unless `options.skip_failed_links` is set,
/// in which case failing lines are logged and dropped.
pub fn parse_links(links_text: &str, options: &Options) -> Result<Vec<Proxy>, ConvertError> {
    let lines = explode_sub(links_text);
    if lines.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let mut nodes = Vec::with_capacity(lines.len());
    for line in lines {
        match explode(&line) {
            Ok(node) => nodes.push(node),
            Err(source) if options.skip_failed_links => {
                warn!("Skipping link `{}`: {}", line, source);
            }
            Err(source) => return Err(ConvertError::InvalidLink { line, source }),
        }
    }

    if nodes.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    Ok(nodes)
}

/// Convert newline separated share links into a Clash configuration
///
/// # Arguments
/// * `links_text` - One share link per line, or a Base64 encoded subscription
/// * `options` - Feature toggles of the generated document
///
/// # Returns
/// The YAML document, or the first error encountered. No partial document
/// is ever returned.
pub fn convert(links_text: &str, options: &Options) -> Result<String, ConvertError> {
    let mut nodes = parse_links(links_text, options)?;
    info!("Parsed {} node(s)", nodes.len());

    if let Some(custom) = options.active_custom_server() {
        apply_custom_server(&mut nodes, custom);
    }

    generate_clash_config(&mut nodes, options)
}
