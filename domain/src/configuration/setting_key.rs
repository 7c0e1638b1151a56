//! Persisted setting key derivation

use std::fmt;

/// Namespace prefix shared by every persisted selection key.
pub const SETTING_KEY_NAMESPACE: &str =
    "com.bottlerocketstudios.configuration.ApplicationConfigurationController";

/// Key under which a domain's selected configuration id is persisted
///
/// Derived as `<namespace>.<domainKey>.selectedConfigId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingKey(String);

impl SettingKey {
    pub fn for_domain(domain_key: &str) -> Self {
        Self(format!(
            "{}.{}.selectedConfigId",
            SETTING_KEY_NAMESPACE, domain_key
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
