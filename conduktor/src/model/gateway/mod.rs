//! Gateway resource kinds (`gateway/v2`)

pub mod group;
pub mod interceptor;
pub mod service_account;
pub mod virtual_cluster;

pub const GATEWAY_API_VERSION: &str = "gateway/v2";
