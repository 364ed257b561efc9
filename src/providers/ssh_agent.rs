use super::{labels, strings};
use crate::domain::{DefaultProvider, Params, Service};

pub const AGENT_KEY: &str = "amazeeio-ssh-agent";
pub const KEY_ADDER_KEY: &str = "amazeeio-ssh-agent-add-key";
const IMAGE: &str = "amazeeio/ssh-agent";

/// Long-running SSH agent shared with the project containers.
#[derive(Debug, Clone, Copy)]
pub struct Agent;

impl DefaultProvider for Agent {
    fn key(&self) -> &'static str {
        AGENT_KEY
    }

    fn service(&self, _params: &Params) -> Service {
        let mut service = Service::default();
        service.config.image = IMAGE.to_string();
        service.config.labels = labels(&[
            ("pygmy.defaults", "true"),
            ("pygmy.enable", "true"),
            ("pygmy.name", AGENT_KEY),
            ("pygmy.network", "amazeeio-network"),
            ("pygmy.purpose", "sshagent"),
            ("pygmy.weight", "30"),
        ]);
        service.host_config.restart_policy = "always".to_string();
        service
    }
}

/// One-shot container that loads the user's key into the agent.
#[derive(Debug, Clone, Copy)]
pub struct KeyAdder;

impl DefaultProvider for KeyAdder {
    fn key(&self) -> &'static str {
        KEY_ADDER_KEY
    }

    fn service(&self, _params: &Params) -> Service {
        let mut service = Service::default();
        service.config.image = IMAGE.to_string();
        service.config.labels = labels(&[
            ("pygmy.defaults", "true"),
            ("pygmy.discrete", "true"),
            ("pygmy.enable", "false"),
            ("pygmy.name", KEY_ADDER_KEY),
            ("pygmy.output", "false"),
            ("pygmy.purpose", "addkeys"),
            ("pygmy.weight", "31"),
        ]);
        service.config.cmd = strings(&["ssh-add", "/key"]);
        service.host_config.binds = strings(&["amazeeio-ssh-agent:/tmp/amazeeio_ssh-agent"]);
        service.host_config.auto_remove = true;
        service
    }
}
