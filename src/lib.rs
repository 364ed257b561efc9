pub mod cli;
pub mod domain;
pub mod infra;
pub mod providers;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{Config, ContainerRuntime, Platform, Resolver, Service};
pub use infra::{DockerAdapter, OverrideDocument};
pub use services::{ConfigSetup, ValidationError};
