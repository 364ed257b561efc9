use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = ".pygmy.yml";

pub fn default_config_path() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_CONFIG_NAME)
}

/// Expands `~` and environment variables in a user supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(raw.as_ref()) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned()),
    }
}

/// Layered key/value view over the user's configuration file.
///
/// Defaults registered with [`OverrideDocument::set_default`] sit below the
/// user's document: a key present in the document always shadows the default,
/// so a default can be registered after loading without overriding anything
/// the user wrote. A `null` value counts as not set.
#[derive(Debug, Clone, Default)]
pub struct OverrideDocument {
    defaults: Mapping,
    user: Mapping,
}

impl OverrideDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let user = match serde_yml::from_str::<Value>(content)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            other => bail!(
                "o documento de configuração deve ser um mapa, encontrado {}",
                kind(&other)
            ),
        };

        Ok(Self {
            defaults: Mapping::new(),
            user,
        })
    }

    /// Reads the user document; a missing file is an empty document.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Nenhuma configuração em {:?}, usando apenas padrões", path);
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).with_context(|| format!("lendo {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("parse de {:?}", path))
    }

    pub fn set_default<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let value = serde_yml::to_value(value)
            .with_context(|| format!("serializando padrão para '{key}'"))?;
        self.defaults.insert(Value::String(key.to_string()), value);
        Ok(())
    }

    pub fn is_set(&self, key: &str) -> bool {
        present(self.user.get(key)).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        present(self.user.get(key)).or_else(|| present(self.defaults.get(key)))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(flag) => Some(*flag),
            Value::Number(number) => number.as_i64().map(|n| n != 0),
            Value::String(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" | "" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(raw) => Some(raw.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Deserializes the effective value of `key`; `None` when unset.
    pub fn unmarshal_key<T: DeserializeOwned>(&self, key: &str) -> Option<Result<T>> {
        let value = self.get(key)?.clone();
        Some(serde_yml::from_value(value).with_context(|| format!("decodificando '{key}'")))
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "booleano",
        Value::Number(_) => "número",
        Value::String(_) => "texto",
        Value::Sequence(_) => "lista",
        Value::Mapping(_) => "mapa",
        Value::Tagged(_) => "valor marcado",
    }
}
