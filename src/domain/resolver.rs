use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS forwarding record installed on the host for the configured domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolver {
    pub data: String,
    pub enabled: bool,
    pub file: String,
    pub folder: String,
    pub name: String,
}

impl Resolver {
    pub fn macos(domain: &str) -> Self {
        Self {
            data: "# Generated by amazeeio pygmy\nnameserver 127.0.0.1\nport 6053\n".to_string(),
            enabled: true,
            file: domain.to_string(),
            folder: "/etc/resolver".to_string(),
            name: "MacOS Resolver".to_string(),
        }
    }

    pub fn linux(domain: &str) -> Self {
        Self {
            data: format!(
                "# Generated by amazeeio pygmy\n[Resolve]\nDNS=127.0.0.1:6053\nDomains={domain}\n"
            ),
            enabled: true,
            file: domain.to_string(),
            folder: "/usr/lib/systemd/resolved.conf.d".to_string(),
            name: "Linux Resolver".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Maps an OS identifier (`std::env::consts::OS` style, `darwin` accepted).
    pub fn from_os(os: &str) -> Self {
        match os.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Self::MacOs,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
            Self::Other => write!(f, "other"),
        }
    }
}

type ResolverFactory = fn(&str) -> Resolver;

const RESOLVER_TABLE: &[(Platform, ResolverFactory)] = &[
    (Platform::MacOs, Resolver::macos),
    (Platform::Linux, Resolver::linux),
];

/// Resolver set registered for `platform`; empty when the platform has none.
pub fn default_resolvers(platform: Platform, domain: &str) -> Vec<Resolver> {
    RESOLVER_TABLE
        .iter()
        .filter(|(candidate, _)| *candidate == platform)
        .map(|(_, factory)| factory(domain))
        .collect()
}
