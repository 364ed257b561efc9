use crate::domain::{ContainerRuntime, Volume};
use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Runtime lookups through the `docker` command line client.
#[derive(Debug, Clone)]
pub struct DockerAdapter {
    binary: String,
}

impl DockerAdapter {
    pub fn new() -> Self {
        Self::with_binary("docker")
    }

    pub fn with_binary(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }
}

impl Default for DockerAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for DockerAdapter {
    fn volume(&self, name: &str) -> Result<Option<Volume>> {
        let output = Command::new(&self.binary)
            .args(["volume", "inspect", name])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("inspecionando volume {name}"))?;

        if !output.status.success() {
            return Ok(None);
        }

        parse_volume_inspect(&output.stdout)
            .with_context(|| format!("lendo saída de inspect do volume {name}"))
    }
}

fn parse_volume_inspect(raw: &[u8]) -> Result<Option<Volume>> {
    let volumes: Vec<Volume> = serde_json::from_slice(raw)?;
    Ok(volumes.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inspect_output() {
        let raw = br#"[
    {
        "CreatedAt": "2024-03-01T10:00:00Z",
        "Driver": "local",
        "Labels": {"com.example": "x"},
        "Mountpoint": "/var/lib/docker/volumes/amazeeio-ssh-agent/_data",
        "Name": "amazeeio-ssh-agent",
        "Options": null,
        "Scope": "local"
    }
]"#;

        let volume = parse_volume_inspect(raw).unwrap().unwrap();
        assert_eq!(volume.name, "amazeeio-ssh-agent");
        assert_eq!(volume.driver, "local");
        assert_eq!(volume.scope, "local");
        assert_eq!(volume.labels["com.example"], "x");
        assert!(volume.options.is_empty());
    }

    #[test]
    fn empty_inspect_output_is_absence() {
        assert_eq!(parse_volume_inspect(b"[]").unwrap(), None);
    }

    #[test]
    fn garbage_output_is_an_error() {
        assert!(parse_volume_inspect(b"Error: no such volume").is_err());
    }

    #[test]
    fn missing_binary_is_an_error() {
        let adapter = DockerAdapter::with_binary("pygmy-test-no-such-docker-binary");
        assert!(adapter.volume("anything").is_err());
    }
}
