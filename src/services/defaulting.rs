use crate::domain::{Config, Service};
use tracing::debug;

/// Decides whether `provider_default` is merged into `config.services[key]`
/// and performs the merge. Returns whether a merge happened.
///
/// For an existing entry the first matching rule wins:
/// 1. its `pygmy.defaults` label is truthy: the entry is replaced by the
///    provider default,
/// 2. its `defaults` flag reads true: the provider fills the entry's gaps,
/// 3. the provider's own `pygmy.defaults` label is truthy: same as 2,
/// 4. otherwise the entry is left alone.
///
/// A missing entry is created from the provider default when the provider's
/// `defaults` flag reads true.
pub fn import_defaults(config: &mut Config, key: &str, provider_default: &Service) -> bool {
    let Some(existing) = config.services.get_mut(key) else {
        if !provider_default.defaults().unwrap_or(false) {
            debug!("{key}: padrão não habilitado, nada a importar");
            return false;
        }

        let mut service = Service::default();
        service.merge_defaults(provider_default);
        config.services.insert(key.to_string(), service);
        debug!("{key}: importado dos padrões");
        return true;
    };

    if existing.has_truthy_label("defaults") {
        let mut service = Service::default();
        service.merge_defaults(provider_default);
        *existing = service;
        debug!("{key}: substituído pelos padrões (label pygmy.defaults)");
        return true;
    }

    if existing.defaults().unwrap_or(false) || provider_default.has_truthy_label("defaults") {
        existing.merge_defaults(provider_default);
        debug!("{key}: completado com os padrões");
        return true;
    }

    debug!("{key}: mantido como configurado");
    false
}
