//! Core data models for the converter
//!
//! This module contains the primary data structures used throughout the crate,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use v2ray_to_clash::models::{Proxy, ProxySettings, ProxyType};
//!
//! let proxy = Proxy::new(
//!     ProxySettings::Trojan { password: "secret".to_string() },
//!     "",
//!     "example.com",
//!     443,
//! );
//! assert_eq!(proxy.proxy_type(), ProxyType::Trojan);
//! assert_eq!(proxy.remark, "Trojan Server");
//! ```

mod options;
mod proxy;

pub use options::*;
pub use proxy::*;
