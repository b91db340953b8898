pub mod error;
pub mod gate;
pub mod host;
pub mod local_client;
pub mod principal;
pub mod repo;
pub mod routes;
pub mod service;
pub mod session;
pub mod tenant_resolver;

pub use error::DomainError;
pub use service::GateService;
