//! Gateway resources

pub mod group;
pub mod interceptor;
pub mod service_account;
pub mod virtual_cluster;

pub use group::GatewayGroupMapper;
pub use interceptor::InterceptorMapper;
pub use service_account::GatewayServiceAccountMapper;
pub use virtual_cluster::VirtualClusterMapper;
