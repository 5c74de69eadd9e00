pub mod converter;

pub use converter::{convert, parse_links};
