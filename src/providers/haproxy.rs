use super::{labels, ports_only, strings};
use crate::domain::{DefaultProvider, Params, Service};

pub const KEY: &str = "amazeeio-haproxy";

/// Reverse proxy routing `*.<domain>` to project containers.
#[derive(Debug, Clone, Copy)]
pub struct Haproxy;

impl DefaultProvider for Haproxy {
    fn key(&self) -> &'static str {
        KEY
    }

    fn service(&self, params: &Params) -> Service {
        let mut service = Service::default();
        service.config.image = "amazeeio/haproxy".to_string();
        service.config.labels = labels(&[
            ("pygmy.defaults", "true"),
            ("pygmy.enable", "true"),
            ("pygmy.name", KEY),
            ("pygmy.network", "amazeeio-network"),
            ("pygmy.weight", "14"),
        ]);
        service.url = Some(format!("http://{}/stats", params.domain));
        service.host_config.binds = strings(&["/var/run/docker.sock:/tmp/docker.sock"]);
        service.host_config.restart_policy = "always".to_string();
        service
    }

    fn default_ports(&self) -> Option<Service> {
        Some(ports_only(&[("80/tcp", "80")]))
    }
}
