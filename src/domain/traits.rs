use super::{Service, Volume};
use anyhow::Result;
use std::fmt::Debug;

/// Trait for container runtime operations
pub trait ContainerRuntime: Send + Sync + Debug {
    /// Look up a volume by name; `Ok(None)` when the runtime does not know it
    fn volume(&self, name: &str) -> Result<Option<Volume>>;
}

/// Inputs handed to every default provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub domain: String,
}

/// Compiled-in baseline for one auxiliary service
pub trait DefaultProvider {
    /// Map key the baseline is imported under
    fn key(&self) -> &'static str;

    /// Baseline service description
    fn service(&self, params: &Params) -> Service;

    /// Port bindings applied when nothing else published a port
    fn default_ports(&self) -> Option<Service> {
        None
    }
}
