use super::{labels, ports_only, strings};
use crate::domain::{DefaultProvider, Params, Service};

pub const KEY: &str = "amazeeio-mailhog";

/// SMTP catcher with a web UI served through the proxy.
#[derive(Debug, Clone, Copy)]
pub struct Mailhog;

impl DefaultProvider for Mailhog {
    fn key(&self) -> &'static str {
        KEY
    }

    fn service(&self, params: &Params) -> Service {
        let mut service = Service::default();
        service.config.image = "mailhog/mailhog".to_string();
        service.config.labels = labels(&[
            ("pygmy.defaults", "true"),
            ("pygmy.enable", "true"),
            ("pygmy.name", KEY),
            ("pygmy.network", "amazeeio-network"),
            ("pygmy.weight", "15"),
        ]);
        service.url = Some(format!("http://mailhog.{}", params.domain));
        service.config.env = vec![
            "MH_UI_BIND_ADDR=0.0.0.0:80".to_string(),
            "MH_API_BIND_ADDR=0.0.0.0:80".to_string(),
            "AMAZEEIO=AMAZEEIO".to_string(),
            format!("AMAZEEIO_URL=mailhog.{}", params.domain),
            "AMAZEEIO_HTTP_PORT=80".to_string(),
        ];
        service.config.exposed_ports = strings(&["80/tcp", "1025/tcp", "8025/tcp"]);
        service.host_config.restart_policy = "always".to_string();
        service
    }

    fn default_ports(&self) -> Option<Service> {
        Some(ports_only(&[("1025/tcp", "1025")]))
    }
}
