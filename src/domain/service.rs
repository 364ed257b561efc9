use super::resource::{null_as_default, scalar_list, scalar_map};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Namespace for the logical fields that may be carried as container labels.
pub const LABEL_PREFIX: &str = "pygmy.";

/// Label values `"1"` and `"true"` switch a flag on; anything else is off.
pub fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PortBinding {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host_ip: String,
    pub host_port: String,
}

impl PortBinding {
    pub fn host_port(port: &str) -> Self {
        Self {
            host_ip: String::new(),
            host_port: port.to_string(),
        }
    }
}

/// Container-level settings, shaped after the runtime's `Config` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(
        deserialize_with = "scalar_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(deserialize_with = "scalar_list", skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    #[serde(deserialize_with = "scalar_list", skip_serializing_if = "Vec::is_empty")]
    pub cmd: Vec<String>,
    #[serde(deserialize_with = "scalar_list", skip_serializing_if = "Vec::is_empty")]
    pub exposed_ports: Vec<String>,
}

/// Host-level settings, shaped after the runtime's `HostConfig` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostConfig {
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub port_bindings: BTreeMap<String, Vec<PortBinding>>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub binds: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub cap_add: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub restart_policy: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub auto_remove: bool,
}

/// One managed auxiliary container.
///
/// `name`, `weight` and `defaults` can be set either as typed fields or as
/// `pygmy.<field>` labels. The accessors read the typed field first and fall
/// back to the label, returning `None` when neither is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Service {
    pub config: ContainerConfig,
    pub host_config: HostConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Service {
    pub fn label(&self, field: &str) -> Option<&str> {
        self.config
            .labels
            .get(&format!("{LABEL_PREFIX}{field}"))
            .map(String::as_str)
    }

    pub fn has_truthy_label(&self, field: &str) -> bool {
        self.label(field).is_some_and(is_truthy)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().or_else(|| self.label("name"))
    }

    pub fn weight(&self) -> Option<i64> {
        self.weight.or_else(|| {
            let raw = self.label("weight")?;
            match raw.trim().parse() {
                Ok(weight) => Some(weight),
                Err(e) => {
                    warn!("label {LABEL_PREFIX}weight={raw:?} is not an integer: {e}");
                    None
                }
            }
        })
    }

    pub fn defaults(&self) -> Option<bool> {
        self.defaults.or_else(|| self.label("defaults").map(is_truthy))
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().or_else(|| self.label("url"))
    }

    pub fn image(&self) -> &str {
        &self.config.image
    }

    pub fn has_port_bindings(&self) -> bool {
        !self.host_config.port_bindings.is_empty()
    }

    /// Fills every unset field of `self` from `defaults`.
    ///
    /// Values already present on `self` always win. Maps are merged key by
    /// key, lists and scalars are only taken when `self` leaves them empty.
    pub fn merge_defaults(&mut self, defaults: &Service) {
        self.config.merge_defaults(&defaults.config);
        self.host_config.merge_defaults(&defaults.host_config);
        fill_option(&mut self.name, &defaults.name);
        fill_option(&mut self.weight, &defaults.weight);
        fill_option(&mut self.defaults, &defaults.defaults);
        fill_option(&mut self.url, &defaults.url);
    }
}

impl ContainerConfig {
    fn merge_defaults(&mut self, defaults: &ContainerConfig) {
        fill_string(&mut self.image, &defaults.image);
        fill_map(&mut self.labels, &defaults.labels);
        fill_vec(&mut self.env, &defaults.env);
        fill_vec(&mut self.cmd, &defaults.cmd);
        fill_vec(&mut self.exposed_ports, &defaults.exposed_ports);
    }
}

impl HostConfig {
    fn merge_defaults(&mut self, defaults: &HostConfig) {
        fill_map(&mut self.port_bindings, &defaults.port_bindings);
        fill_vec(&mut self.binds, &defaults.binds);
        fill_vec(&mut self.cap_add, &defaults.cap_add);
        fill_string(&mut self.restart_policy, &defaults.restart_policy);
        self.auto_remove |= defaults.auto_remove;
    }
}

pub(crate) fn fill_string(target: &mut String, default: &str) {
    if target.is_empty() {
        *target = default.to_string();
    }
}

pub(crate) fn fill_vec<T: Clone>(target: &mut Vec<T>, default: &[T]) {
    if target.is_empty() {
        *target = default.to_vec();
    }
}

pub(crate) fn fill_map<V: Clone>(target: &mut BTreeMap<String, V>, default: &BTreeMap<String, V>) {
    for (key, value) in default {
        target
            .entry(key.clone())
            .or_insert_with(|| value.clone());
    }
}

fn fill_option<T: Clone>(target: &mut Option<T>, default: &Option<T>) {
    if target.is_none() {
        *target = default.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(pairs: &[(&str, &str)]) -> Service {
        let mut service = Service::default();
        for (key, value) in pairs {
            service
                .config
                .labels
                .insert(key.to_string(), value.to_string());
        }
        service
    }

    #[test]
    fn truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(!is_truthy("TRUE"));
        assert!(!is_truthy("yes"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn accessors_fall_back_to_labels() {
        let service = labelled(&[
            ("pygmy.name", "amazeeio-haproxy"),
            ("pygmy.weight", "14"),
            ("pygmy.defaults", "true"),
        ]);

        assert_eq!(service.name(), Some("amazeeio-haproxy"));
        assert_eq!(service.weight(), Some(14));
        assert_eq!(service.defaults(), Some(true));
    }

    #[test]
    fn typed_fields_win_over_labels() {
        let mut service = labelled(&[("pygmy.name", "from-label"), ("pygmy.weight", "14")]);
        service.name = Some("from-field".into());
        service.weight = Some(3);
        service.defaults = Some(false);

        assert_eq!(service.name(), Some("from-field"));
        assert_eq!(service.weight(), Some(3));
        assert_eq!(service.defaults(), Some(false));
    }

    #[test]
    fn absent_is_distinct_from_zero() {
        let service = Service::default();
        assert_eq!(service.name(), None);
        assert_eq!(service.weight(), None);
        assert_eq!(service.defaults(), None);

        let zero = labelled(&[("pygmy.weight", "0"), ("pygmy.defaults", "0")]);
        assert_eq!(zero.weight(), Some(0));
        assert_eq!(zero.defaults(), Some(false));
    }

    #[test]
    fn unparsable_weight_reads_as_absent() {
        let service = labelled(&[("pygmy.weight", "heavy")]);
        assert_eq!(service.weight(), None);
    }

    #[test]
    fn merge_keeps_override_values_and_fills_gaps() {
        let mut existing = labelled(&[("pygmy.weight", "99")]);
        existing.config.image = "custom/haproxy:2".into();
        existing.config.env = vec!["A=1".into()];

        let mut defaults = labelled(&[("pygmy.weight", "14"), ("pygmy.name", "amazeeio-haproxy")]);
        defaults.config.image = "amazeeio/haproxy".into();
        defaults.config.env = vec!["B=2".into(), "C=3".into()];
        defaults.config.cmd = vec!["haproxy".into()];
        defaults.host_config.restart_policy = "always".into();
        defaults.host_config.auto_remove = true;

        existing.merge_defaults(&defaults);

        assert_eq!(existing.image(), "custom/haproxy:2");
        assert_eq!(existing.config.env, vec!["A=1".to_string()]);
        assert_eq!(existing.config.cmd, vec!["haproxy".to_string()]);
        assert_eq!(existing.weight(), Some(99));
        assert_eq!(existing.name(), Some("amazeeio-haproxy"));
        assert_eq!(existing.host_config.restart_policy, "always");
        assert!(existing.host_config.auto_remove);
    }

    #[test]
    fn merge_combines_port_bindings_per_key() {
        let mut existing = Service::default();
        existing
            .host_config
            .port_bindings
            .insert("80/tcp".into(), vec![PortBinding::host_port("8080")]);

        let mut defaults = Service::default();
        defaults
            .host_config
            .port_bindings
            .insert("80/tcp".into(), vec![PortBinding::host_port("80")]);
        defaults
            .host_config
            .port_bindings
            .insert("443/tcp".into(), vec![PortBinding::host_port("443")]);

        existing.merge_defaults(&defaults);

        let bindings = &existing.host_config.port_bindings;
        assert_eq!(bindings["80/tcp"][0].host_port, "8080");
        assert_eq!(bindings["443/tcp"][0].host_port, "443");
    }

    #[test]
    fn deserializes_runtime_shaped_yaml() {
        let yaml = r#"
Config:
  Image: mailhog/mailhog
  Labels:
    pygmy.name: amazeeio-mailhog
    pygmy.weight: "15"
HostConfig:
  PortBindings:
    1025/tcp:
      - HostPort: "1025"
"#;
        let service: Service = serde_yml::from_str(yaml).unwrap();
        assert_eq!(service.image(), "mailhog/mailhog");
        assert_eq!(service.name(), Some("amazeeio-mailhog"));
        assert_eq!(service.weight(), Some(15));
        assert!(service.has_port_bindings());
    }

    #[test]
    fn null_labels_deserialize_as_empty() {
        let yaml = "Config:\n  Image: busybox\n  Labels:\n";
        let service: Service = serde_yml::from_str(yaml).unwrap();
        assert!(service.config.labels.is_empty());
    }

    #[test]
    fn unquoted_scalars_are_read_as_text() {
        let yaml = r#"
Config:
  Image: solr
  Labels:
    pygmy.name: solr
    pygmy.weight: 20
    pygmy.defaults: true
  Env: [SOLR_HEAP=512m, 8983]
"#;
        let service: Service = serde_yml::from_str(yaml).unwrap();
        assert_eq!(service.label("weight"), Some("20"));
        assert_eq!(service.weight(), Some(20));
        assert_eq!(service.defaults(), Some(true));
        assert_eq!(service.config.env, vec!["SOLR_HEAP=512m", "8983"]);
    }
}
