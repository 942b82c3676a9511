// cstemplate-api: Async Rust client for the CloudStack template APIs

pub mod auth;
pub mod catalog;
pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod templates;
pub mod transport;

pub use auth::Credentials;
pub use client::CloudStackClient;
pub use error::Error;
pub use models::{AsyncJob, ListTemplates, OsType, RegisterTemplate, ResourceTag, Template, Zone};
pub use transport::TransportConfig;
