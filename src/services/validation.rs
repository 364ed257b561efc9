use crate::domain::Config;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("serviço '{service}' não possui valor para a label 'pygmy.name'")]
    MissingName { service: String },

    #[error("serviço '{service}' não possui valor para {{{{.Config.Image}}}}")]
    MissingImage { service: String },
}

impl ValidationError {
    /// Process exit status for a configuration that fails validation.
    pub const EXIT_CODE: u8 = 2;

    pub fn service(&self) -> &str {
        match self {
            Self::MissingName { service } | Self::MissingImage { service } => service,
        }
    }
}

/// Fails on the first service without a name or an image.
///
/// Services are visited in key order so the reported service is stable.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    let mut ids: Vec<&String> = config.services.keys().collect();
    ids.sort();

    for id in ids {
        let service = &config.services[id];

        if service.name().is_none_or(str::is_empty) {
            return Err(ValidationError::MissingName {
                service: id.clone(),
            });
        }

        if service.image().is_empty() {
            return Err(ValidationError::MissingImage {
                service: id.clone(),
            });
        }
    }

    Ok(())
}
