use shelflife_client::ClientConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub client: ClientConfig,
    /// Show the sample library and never call the backend for it.
    pub use_fake_works: bool,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `SHELFLIFE_USE_FAKE_WORKS`| `false` |
    ///
    /// plus everything read by [`ClientConfig::from_env`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let use_fake_works = lookup("SHELFLIFE_USE_FAKE_WORKS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Self {
            client: ClientConfig::from_lookup(&lookup),
            use_fake_works,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_with(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn fake_works_off_by_default() {
        assert!(!config_with(&[]).use_fake_works);
    }

    #[test]
    fn fake_works_flag_spellings() {
        assert!(config_with(&[("SHELFLIFE_USE_FAKE_WORKS", "true")]).use_fake_works);
        assert!(config_with(&[("SHELFLIFE_USE_FAKE_WORKS", " TRUE ")]).use_fake_works);
        assert!(config_with(&[("SHELFLIFE_USE_FAKE_WORKS", "1")]).use_fake_works);
        assert!(!config_with(&[("SHELFLIFE_USE_FAKE_WORKS", "false")]).use_fake_works);
        assert!(!config_with(&[("SHELFLIFE_USE_FAKE_WORKS", "")]).use_fake_works);
    }

    #[test]
    fn client_settings_pass_through() {
        let config = config_with(&[("SHELFLIFE_API_BASE", "http://api.test/")]);
        assert_eq!(config.client.api_base, "http://api.test");
    }
}
