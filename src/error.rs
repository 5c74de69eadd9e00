use thiserror::Error;

/// Why a single share link could not be turned into a proxy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl ParseError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ParseError::MalformedPayload(reason.into())
    }
}

/// Errors surfaced by a whole conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("No valid share links found")]
    EmptyInput,

    #[error("Failed to parse link `{line}`: {source}")]
    InvalidLink {
        line: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl ConvertError {
    /// The underlying parse failure, if this error is about a specific link.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            ConvertError::InvalidLink { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors raised while loading an options file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
