//! Compiled-in baselines for the auxiliary services pygmy manages.

pub mod dnsmasq;
pub mod haproxy;
pub mod mailhog;
pub mod network;
pub mod ssh_agent;

use crate::domain::{DefaultProvider, PortBinding, Service};
use std::collections::BTreeMap;

/// Providers in the order their defaults are imported.
pub fn default_set() -> Vec<Box<dyn DefaultProvider>> {
    vec![
        Box::new(ssh_agent::Agent),
        Box::new(ssh_agent::KeyAdder),
        Box::new(dnsmasq::Dnsmasq),
        Box::new(haproxy::Haproxy),
        Box::new(mailhog::Mailhog),
    ]
}

pub(crate) fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Service carrying nothing but host port bindings.
pub(crate) fn ports_only(bindings: &[(&str, &str)]) -> Service {
    let mut service = Service::default();
    for (container_port, host_port) in bindings {
        service.host_config.port_bindings.insert(
            container_port.to_string(),
            vec![PortBinding::host_port(host_port)],
        );
    }
    service
}
