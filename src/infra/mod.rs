pub mod config;
pub mod docker_adapter;

pub use config::OverrideDocument;
pub use docker_adapter::DockerAdapter;
