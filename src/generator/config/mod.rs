pub mod group;
pub mod remark;
pub mod ruleset;
