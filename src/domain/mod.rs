mod config;
pub mod resolver;
mod resource;
mod service;
pub mod traits;

pub use config::{Config, DEFAULT_DOMAIN};
pub use resolver::{Platform, Resolver};
pub use resource::{Network, Volume};
pub use service::{ContainerConfig, HostConfig, LABEL_PREFIX, PortBinding, Service, is_truthy};
pub use traits::{ContainerRuntime, DefaultProvider, Params};
