use crate::domain::{Config, Service};
use tracing::debug;

/// Publishes `default_ports` on `config.services[key]` unless some port
/// binding is already present. Returns whether the defaults were applied.
pub fn backfill_ports(config: &mut Config, key: &str, default_ports: &Service) -> bool {
    let service = config.services.entry(key.to_string()).or_default();

    if service.has_port_bindings() {
        debug!("{key}: portas já configuradas");
        return false;
    }

    service.merge_defaults(default_ports);
    debug!("{key}: portas padrão aplicadas");
    true
}
