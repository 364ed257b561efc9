use super::{Network, Resolver, Service, Volume};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Domain used when neither the caller nor the user document sets one.
pub const DEFAULT_DOMAIN: &str = "docker.amazee.io";

/// Root of the resolved configuration.
///
/// Built empty (or partially filled) by the loader, mutated in place by
/// [`crate::services::ConfigSetup`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub domain: String,
    pub defaults: bool,
    pub resolvers: Vec<Resolver>,
    #[serde(serialize_with = "ordered_map")]
    pub services: HashMap<String, Service>,
    /// `None` means the user never declared the map, which is when the
    /// default network gets installed.
    pub networks: Option<BTreeMap<String, Network>>,
    pub volumes: Option<BTreeMap<String, Volume>>,
    /// Derived by the orderer; never read from user input.
    #[serde(skip_deserializing)]
    pub sorted_services: Vec<String>,
}

impl Config {
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.get(id)
    }

    /// Services in start order. Empty until setup has run.
    pub fn ordered_services(&self) -> impl Iterator<Item = (&str, &Service)> {
        self.sorted_services
            .iter()
            .filter_map(|id| self.services.get(id).map(|svc| (id.as_str(), svc)))
    }
}

fn ordered_map<S: Serializer>(
    services: &HashMap<String, Service>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    services
        .iter()
        .collect::<BTreeMap<_, _>>()
        .serialize(serializer)
}
