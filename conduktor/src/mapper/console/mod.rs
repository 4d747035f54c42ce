//! Console resources

mod permission;
mod security;

pub mod application;
pub mod application_group;
pub mod application_instance;
pub mod application_instance_permission;
pub mod connector;
pub mod group;
pub mod kafka_cluster;
pub mod kafka_connect;
pub mod partner_zone;
pub mod resource_policy;
pub mod service_account;
pub mod subject;
pub mod topic;
pub mod topic_policy;
pub mod user;

pub use application::ApplicationMapper;
pub use application_group::ApplicationGroupMapper;
pub use application_instance::ApplicationInstanceMapper;
pub use application_instance_permission::ApplicationInstancePermissionMapper;
pub use connector::ConnectorMapper;
pub use group::GroupMapper;
pub use kafka_cluster::KafkaClusterMapper;
pub use kafka_connect::KafkaConnectMapper;
pub use partner_zone::PartnerZoneMapper;
pub use resource_policy::ResourcePolicyMapper;
pub use service_account::ServiceAccountMapper;
pub use subject::SubjectMapper;
pub use topic::TopicMapper;
pub use topic_policy::TopicPolicyMapper;
pub use user::UserMapper;
