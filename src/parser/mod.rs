pub mod explodes;
pub mod node_manip;

pub use explodes::{explode, explode_sub};
pub use node_manip::apply_custom_server;
