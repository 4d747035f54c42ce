//! Console resource kinds

pub mod application;
pub mod application_group;
pub mod application_instance;
pub mod application_instance_permission;
pub mod connector;
pub mod group;
pub mod kafka_cluster;
pub mod kafka_connect;
pub mod partner_zone;
pub mod permission;
pub mod resource_policy;
pub mod service_account;
pub mod subject;
pub mod topic;
pub mod topic_policy;
pub mod user;
