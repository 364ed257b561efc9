use crate::domain::{ContainerRuntime, Volume};
use anyhow::{Result, bail};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug)]
pub struct MockRuntime {
    volumes: RwLock<HashMap<String, Volume>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            volumes: RwLock::new(HashMap::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
        }
    }

    pub fn add_volume(&self, volume: Volume) {
        self.volumes
            .write()
            .unwrap()
            .insert(volume.name.clone(), volume);
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if self.fail_on.read().unwrap().as_deref() == Some(operation) {
            bail!("Mock failure on: {}", operation);
        }
        Ok(())
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for MockRuntime {
    fn volume(&self, name: &str) -> Result<Option<Volume>> {
        self.record_command(&format!("volume:{}", name));
        self.check_fail("volume")?;

        Ok(self.volumes.read().unwrap().get(name).cloned())
    }
}
