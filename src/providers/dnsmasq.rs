use super::{labels, strings};
use crate::domain::{DefaultProvider, Params, PortBinding, Service};

pub const KEY: &str = "amazeeio-dnsmasq";

/// Local DNS server answering for the configured domain on port 6053.
#[derive(Debug, Clone, Copy)]
pub struct Dnsmasq;

impl DefaultProvider for Dnsmasq {
    fn key(&self) -> &'static str {
        KEY
    }

    fn service(&self, params: &Params) -> Service {
        let mut service = Service::default();
        service.config.image = "andyshinn/dnsmasq:2.78".to_string();
        service.config.labels = labels(&[
            ("pygmy.defaults", "true"),
            ("pygmy.enable", "true"),
            ("pygmy.name", KEY),
            ("pygmy.weight", "13"),
        ]);
        service.config.cmd = vec![
            "--log-facility=-".to_string(),
            "-A".to_string(),
            format!("/{}/127.0.0.1", params.domain),
        ];
        service.config.exposed_ports = strings(&["53/tcp", "53/udp"]);
        service.host_config.cap_add = strings(&["NET_ADMIN"]);
        service.host_config.restart_policy = "always".to_string();
        for port in ["53/tcp", "53/udp"] {
            service
                .host_config
                .port_bindings
                .insert(port.to_string(), vec![PortBinding::host_port("6053")]);
        }
        service
    }
}
