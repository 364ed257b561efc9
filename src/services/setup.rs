use crate::domain::resolver::default_resolvers;
use crate::domain::{
    Config, ContainerRuntime, DEFAULT_DOMAIN, DefaultProvider, Network, Params, Platform, Resolver,
    Service, Volume,
};
use crate::infra::OverrideDocument;
use crate::providers;
use crate::services::defaulting::import_defaults;
use crate::services::ordering::sort_services;
use crate::services::ports::backfill_ports;
use crate::services::validation::{ValidationError, validate};
use serde::de::DeserializeOwned;
use serde_yml::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves a [`Config`] from the user document, the compiled-in providers and
/// the platform's resolver defaults.
///
/// Running it twice over the same inputs yields the same configuration. It
/// holds the configuration exclusively for the duration of [`ConfigSetup::run`].
pub struct ConfigSetup {
    runtime: Arc<dyn ContainerRuntime>,
    platform: Platform,
    providers: Vec<Box<dyn DefaultProvider>>,
}

impl ConfigSetup {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, platform: Platform) -> Self {
        Self::with_providers(runtime, platform, providers::default_set())
    }

    pub fn with_providers(
        runtime: Arc<dyn ContainerRuntime>,
        platform: Platform,
        providers: Vec<Box<dyn DefaultProvider>>,
    ) -> Self {
        Self {
            runtime,
            platform,
            providers,
        }
    }

    pub fn run(
        &self,
        config: &mut Config,
        document: &mut OverrideDocument,
    ) -> Result<(), ValidationError> {
        self.register_defaults(config, document);
        unmarshal(document, config);

        if config.domain.is_empty() {
            config.domain = effective_domain(document);
        }

        if config.defaults {
            self.apply_defaults(config);
        } else {
            info!("Padrões desabilitados, usando apenas a configuração do usuário");
        }

        validate(config)?;
        config.sorted_services = sort_services(&config.services);
        debug!("Ordem dos serviços: {:?}", config.sorted_services);

        Ok(())
    }

    fn register_defaults(&self, config: &mut Config, document: &mut OverrideDocument) {
        register(document, "defaults", true);
        register(document, "domain", DEFAULT_DOMAIN);

        if config.domain.is_empty() {
            config.domain = effective_domain(document);
        }

        // Registered before unmarshalling so a user supplied list wins as is.
        if defaults_enabled(document) {
            let resolvers = default_resolvers(self.platform, &config.domain);
            debug!(
                "{} resolver(s) padrão para {}",
                resolvers.len(),
                self.platform
            );
            register(document, "resolvers", resolvers);
        }
    }

    fn apply_defaults(&self, config: &mut Config) {
        let params = Params {
            domain: config.domain.clone(),
        };

        config.services.reserve(self.providers.len());

        for provider in &self.providers {
            let default = provider.service(&params);
            import_defaults(config, provider.key(), &default);
        }

        // After the import pass, which may already have published ports.
        for provider in &self.providers {
            if let Some(ports) = provider.default_ports() {
                backfill_ports(config, provider.key(), &ports);
            }
        }

        if config.networks.is_none() {
            let network = providers::network::new();
            config.networks = Some(BTreeMap::from([(network.name.clone(), network)]));
        }

        let volumes = config.volumes.get_or_insert_with(BTreeMap::new);
        for (key, declared) in volumes.iter_mut() {
            if declared.name.is_empty() {
                declared.name = key.clone();
            }

            let existing = match self.runtime.volume(&declared.name) {
                Ok(found) => found,
                Err(e) => {
                    debug!("Volume {} indisponível no runtime: {e:#}", declared.name);
                    None
                }
            };

            declared.merge_defaults(&existing.unwrap_or_else(|| Volume::named(key)));
        }

        info!(
            "Padrões aplicados: {} serviço(s), {} rede(s), {} volume(s)",
            config.services.len(),
            config.networks.as_ref().map_or(0, BTreeMap::len),
            volumes.len()
        );
    }
}

fn effective_domain(document: &OverrideDocument) -> String {
    document
        .get_string("domain")
        .filter(|domain| !domain.is_empty())
        .unwrap_or_else(|| DEFAULT_DOMAIN.to_string())
}

/// Same lenient reading for the resolver registration and the flag itself.
fn defaults_enabled(document: &OverrideDocument) -> bool {
    document.get_bool("defaults").unwrap_or(true)
}

fn register<T: serde::Serialize>(document: &mut OverrideDocument, key: &str, value: T) {
    if let Err(e) = document.set_default(key, value) {
        warn!("Não foi possível registrar o padrão '{key}': {e:#}");
    }
}

/// Copies every key of the document onto `config`. A key that does not
/// decode is reported and skipped; the others still apply. Map sections are
/// decoded entry by entry, so one bad entry only drops itself.
fn unmarshal(document: &OverrideDocument, config: &mut Config) {
    config.defaults = defaults_enabled(document);
    // The registered domain only fills an empty one, see `effective_domain`.
    if document.is_set("domain") {
        if let Some(domain) = decode::<String>(document, "domain") {
            config.domain = domain;
        }
    }
    if let Some(resolvers) = decode::<Vec<Resolver>>(document, "resolvers") {
        config.resolvers = resolvers;
    }
    if let Some(services) = decode_entries::<Service>(document, "services") {
        config.services.extend(services);
    }
    if let Some(networks) = decode_entries::<Network>(document, "networks") {
        config.networks.get_or_insert_with(BTreeMap::new).extend(networks);
    }
    if let Some(volumes) = decode_entries::<Volume>(document, "volumes") {
        config.volumes.get_or_insert_with(BTreeMap::new).extend(volumes);
    }
}

fn decode<T: DeserializeOwned>(document: &OverrideDocument, key: &str) -> Option<T> {
    match document.unmarshal_key(key)? {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignorando '{key}' da configuração: {e:#}");
            None
        }
    }
}

fn decode_entries<T>(document: &OverrideDocument, key: &str) -> Option<Vec<(String, T)>>
where
    T: DeserializeOwned + Default,
{
    let Value::Mapping(entries) = document.get(key)? else {
        warn!("Ignorando '{key}' da configuração: esperado um mapa");
        return None;
    };

    let mut decoded = Vec::with_capacity(entries.len());
    for (name, value) in entries {
        let Some(name) = name.as_str() else {
            warn!("Ignorando entrada de '{key}' com nome inválido: {name:?}");
            continue;
        };

        if value.is_null() {
            decoded.push((name.to_string(), T::default()));
            continue;
        }

        match serde_yml::from_value::<T>(value.clone()) {
            Ok(entry) => decoded.push((name.to_string(), entry)),
            Err(e) => warn!("Ignorando '{key}.{name}' da configuração: {e}"),
        }
    }

    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRuntime;

    fn setup(platform: Platform) -> (ConfigSetup, Arc<MockRuntime>) {
        let mock = Arc::new(MockRuntime::new());
        (ConfigSetup::new(mock.clone(), platform), mock)
    }

    fn run(platform: Platform, yaml: &str) -> Config {
        let (setup, _mock) = setup(platform);
        let mut document = OverrideDocument::from_yaml(yaml).unwrap();
        let mut config = Config::default();
        setup.run(&mut config, &mut document).unwrap();
        config
    }

    #[test]
    fn empty_domain_falls_back() {
        let config = run(Platform::Linux, "defaults: true\ndomain: \"\"\n");
        assert_eq!(config.domain, DEFAULT_DOMAIN);
    }

    #[test]
    fn defaults_are_on_without_a_document() {
        let config = run(Platform::Other, "");
        assert!(config.defaults);
        assert_eq!(config.services.len(), 5);
    }

    #[test]
    fn disabled_defaults_skip_providers_and_resolvers() {
        let config = run(Platform::MacOs, "defaults: false\n");
        assert!(!config.defaults);
        assert!(config.services.is_empty());
        assert!(config.resolvers.is_empty());
        assert!(config.networks.is_none());
        assert!(config.sorted_services.is_empty());
    }

    #[test]
    fn resolver_uses_user_domain() {
        let config = run(Platform::MacOs, "domain: pygmy.test\n");
        assert_eq!(config.resolvers.len(), 1);
        assert_eq!(config.resolvers[0].file, "pygmy.test");
    }

    #[test]
    fn caller_domain_is_kept() {
        let (setup, _mock) = setup(Platform::Linux);
        let mut document = OverrideDocument::new();
        let mut config = Config {
            domain: "preset.test".into(),
            ..Default::default()
        };
        setup.run(&mut config, &mut document).unwrap();
        assert_eq!(config.domain, "preset.test");
        assert!(config.resolvers[0].data.contains("Domains=preset.test"));
    }

    #[test]
    fn bad_key_does_not_block_the_rest() {
        let config = run(
            Platform::Linux,
            "domain: pygmy.test\nresolvers: not-a-list\nnetworks: 12\n",
        );
        assert_eq!(config.domain, "pygmy.test");
        assert!(config.resolvers.is_empty());
        assert!(config.networks.unwrap().contains_key("amazeeio-network"));
    }

    #[test]
    fn declared_networks_replace_the_default() {
        let config = run(
            Platform::Linux,
            "networks:\n  custom:\n    Name: custom\n    Driver: bridge\n",
        );
        let networks = config.networks.unwrap();
        assert_eq!(networks.len(), 1);
        assert!(networks.contains_key("custom"));
    }

    #[test]
    fn volumes_are_looked_up_and_merged() {
        let (setup, mock) = setup(Platform::Linux);
        let mut existing = Volume::named("data");
        existing.driver = "local".into();
        existing.mountpoint = "/var/lib/docker/volumes/data/_data".into();
        mock.add_volume(existing);

        let mut document = OverrideDocument::from_yaml(
            "volumes:\n  data:\n    Labels:\n      owner: me\n  fresh: {}\n",
        )
        .unwrap();
        let mut config = Config::default();
        setup.run(&mut config, &mut document).unwrap();

        let volumes = config.volumes.unwrap();
        assert_eq!(volumes["data"].name, "data");
        assert_eq!(volumes["data"].driver, "local");
        assert_eq!(volumes["data"].labels["owner"], "me");
        assert_eq!(volumes["fresh"].name, "fresh");
        assert!(mock.get_commands().contains(&"volume:data".to_string()));
        assert!(mock.get_commands().contains(&"volume:fresh".to_string()));
    }

    #[test]
    fn volume_lookup_failures_are_absence() {
        let (setup, mock) = setup(Platform::Linux);
        mock.set_fail_on("volume");

        let mut document = OverrideDocument::from_yaml("volumes:\n  data: {}\n").unwrap();
        let mut config = Config::default();
        setup.run(&mut config, &mut document).unwrap();

        assert_eq!(config.volumes.unwrap()["data"], Volume::named("data"));
    }

    #[test]
    fn rerun_is_idempotent() {
        let (setup, _mock) = setup(Platform::Linux);
        let yaml = "domain: pygmy.test\nvolumes:\n  data: {}\n";

        let mut first = Config::default();
        setup
            .run(&mut first, &mut OverrideDocument::from_yaml(yaml).unwrap())
            .unwrap();
        let mut second = first.clone();
        setup
            .run(&mut second, &mut OverrideDocument::from_yaml(yaml).unwrap())
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn quoted_defaults_flag_turns_defaulting_on() {
        let config = run(Platform::Linux, "defaults: \"true\"\n");
        assert!(config.defaults);
        assert_eq!(config.services.len(), 5);
        assert_eq!(config.resolvers.len(), 1);
        assert!(config.networks.is_some());
    }

    #[test]
    fn unreadable_defaults_flag_keeps_the_registered_value() {
        let config = run(Platform::Linux, "defaults: maybe\n");
        assert!(config.defaults);
        assert_eq!(config.services.len(), 5);
    }

    #[test]
    fn bad_service_entry_only_drops_itself() {
        let config = run(
            Platform::Linux,
            "services:\n  amazeeio-haproxy:\n    Config:\n      Image: custom/haproxy\n  broken:\n    Config: 12\n",
        );
        assert_eq!(config.services["amazeeio-haproxy"].image(), "custom/haproxy");
        assert!(!config.services.contains_key("broken"));
    }

    #[test]
    fn numeric_label_keeps_neighbouring_overrides() {
        let config = run(
            Platform::Linux,
            r#"
services:
  amazeeio-haproxy:
    Config:
      Image: custom/haproxy
  solr:
    Config:
      Image: solr
      Labels:
        pygmy.name: solr
        pygmy.weight: 20
"#,
        );
        assert_eq!(config.services["amazeeio-haproxy"].image(), "custom/haproxy");
        assert_eq!(config.services["solr"].weight(), Some(20));
        assert!(config.sorted_services.contains(&"solr".to_string()));
    }
}
