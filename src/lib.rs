pub mod constants;
pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod api;

// Re-export the conversion entry point
pub use interfaces::convert;

// Re-export the main proxy types for easier access
pub use models::{Options, Proxy, ProxySettings, ProxyType, Transport};

pub use error::{ConvertError, ParseError, SettingsError};
