use crate::domain::{Config, ContainerRuntime, Platform};
use crate::infra::{DockerAdapter, OverrideDocument};
use crate::services::ConfigSetup;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Loads the user document at `config_path` and resolves it against the
/// docker runtime.
pub fn resolve(config_path: &Path, platform: Platform) -> Result<Config> {
    resolve_with_runtime(config_path, platform, Arc::new(DockerAdapter::new()))
}

pub fn resolve_with_runtime(
    config_path: &Path,
    platform: Platform,
    runtime: Arc<dyn ContainerRuntime>,
) -> Result<Config> {
    info!("Carregando configuração de {:?} ({platform})", config_path);

    let mut document = OverrideDocument::load(config_path)?;
    let mut config = Config::default();
    ConfigSetup::new(runtime, platform).run(&mut config, &mut document)?;

    Ok(config)
}
