pub mod clash;
pub mod proxy_to_clash;
