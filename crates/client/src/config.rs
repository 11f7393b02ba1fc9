use std::path::PathBuf;

/// Origin used when neither the runtime nor the build environment names one.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// API origin baked in at compile time via `SHELFLIFE_API_BASE`, if any.
pub const BUILD_API_BASE: Option<&str> = option_env!("SHELFLIFE_API_BASE");

/// Default location of the persistent key/value store holding the token.
pub const DEFAULT_STORAGE_PATH: &str = ".shelflife/storage.json";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for talking to a backend on the
/// local machine.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend origin without trailing slashes, e.g. `http://localhost:8080`.
    pub api_base: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JSON file backing the [`TokenStore`](crate::TokenStore).
    pub storage_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: normalize_base(BUILD_API_BASE.unwrap_or(DEFAULT_API_BASE)),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default                                   |
    /// |----------------------------------|-------------------------------------------|
    /// | `SHELFLIFE_API_BASE`             | build-time value, else `http://localhost:8080` |
    /// | `SHELFLIFE_REQUEST_TIMEOUT_SECS` | `30`                                      |
    /// | `SHELFLIFE_STORAGE_PATH`         | `.shelflife/storage.json`                 |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through
    /// `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base = lookup("SHELFLIFE_API_BASE")
            .map(|raw| normalize_base(&raw))
            .filter(|base| !base.is_empty())
            .unwrap_or(defaults.api_base);

        let request_timeout_secs = lookup("SHELFLIFE_REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|&secs: &u64| secs > 0)
            .unwrap_or(defaults.request_timeout_secs);

        let storage_path = lookup("SHELFLIFE_STORAGE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        Self {
            api_base,
            request_timeout_secs,
            storage_path,
        }
    }
}

/// Trim whitespace and any trailing slashes from an origin.
pub fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
