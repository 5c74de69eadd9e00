pub mod config;
pub mod exports;
pub mod yaml;

// Re-export the document builders
pub use config::remark::dedup_remarks;
pub use exports::clash::{build_clash_output, generate_clash_config, generate_clash_config_at};
pub use exports::proxy_to_clash::proxy_to_clash;
