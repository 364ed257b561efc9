use crate::domain::Config;
use anyhow::{Context, Result};

pub fn config_yaml(config: &Config) -> Result<String> {
    serde_yml::to_string(config).context("serializando configuração")
}

/// One line per service in start order: weight, id, image.
pub fn start_order(config: &Config) -> String {
    config
        .ordered_services()
        .map(|(id, service)| {
            format!(
                "{:>4}  {:<30} {}\n",
                service.weight().unwrap_or(0),
                id,
                service.image()
            )
        })
        .collect()
}

pub fn resolvers(config: &Config) -> String {
    if config.resolvers.is_empty() {
        return "Nenhum resolver configurado\n".to_string();
    }

    let mut out = String::new();
    for resolver in &config.resolvers {
        let state = if resolver.enabled {
            "ativo"
        } else {
            "inativo"
        };
        out.push_str(&format!(
            "{} ({state}): {}/{}\n",
            resolver.name, resolver.folder, resolver.file
        ));
    }
    out
}
