pub mod clash_output;
pub mod emit;

pub use clash_output::{
    ClashDns, ClashProxy, ClashProxyCommon, ClashProxyGroup, ClashYamlOutput,
    CommonProxyOptions, RuleProvider,
};
pub use emit::to_clash_yaml;
