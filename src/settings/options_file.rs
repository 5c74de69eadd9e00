use std::fs;
use std::path::Path;

use log::info;

use crate::error::SettingsError;
use crate::models::Options;

/// Format of an options file, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    Toml,
    Yaml,
}

impl OptionsFormat {
    /// `.toml` files are TOML, everything else is read as YAML (and so JSON).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => OptionsFormat::Toml,
            _ => OptionsFormat::Yaml,
        }
    }
}

/// Parse options from file content. Absent keys take their defaults.
pub fn parse_options(content: &str, format: OptionsFormat) -> Result<Options, SettingsError> {
    if content.trim().is_empty() {
        return Ok(Options::default());
    }

    let options = match format {
        OptionsFormat::Toml => toml::from_str(content)?,
        OptionsFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(options)
}

/// Load options from a TOML or YAML file
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<Options, SettingsError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let format = OptionsFormat::from_path(path);

    info!("Loading options from {} as {:?}", path.display(), format);
    parse_options(&content, format)
}
