//! Dispatch configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_file_check_ttl_secs() -> u64 {
    30
}

/// Configuration for the front controller.
///
/// Loadable from YAML; every field has a default so partial configuration
/// files work.
///
/// # Examples
///
/// ```
/// use bireli_dispatch::DispatchConfig;
///
/// let config = DispatchConfig::from_yaml("debug: true\nmax_forwards: 20\n").unwrap();
/// assert!(config.debug);
/// assert_eq!(config.max_forwards, Some(20));
/// assert_eq!(config.file_check_ttl_secs, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Verify registry membership after the backing-file check, yielding a
    /// developer-facing diagnostic for scaffolded-but-unregistered
    /// controllers. Off in production: an unregistered controller then
    /// fails with a generic construction error.
    pub debug: bool,

    /// Upper bound on internal forwards per request. `None` preserves the
    /// unguarded loop, where termination is entirely up to the hooks.
    pub max_forwards: Option<usize>,

    /// TTL for memoized backing-file existence flags
    pub file_check_ttl_secs: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_forwards: None,
            file_check_ttl_secs: default_file_check_ttl_secs(),
        }
    }
}

impl DispatchConfig {
    /// Parse a YAML configuration document
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// The file-existence TTL as a [`Duration`]
    pub fn file_check_ttl(&self) -> Duration {
        Duration::from_secs(self.file_check_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();

        assert!(!config.debug);
        assert_eq!(config.max_forwards, None);
        assert_eq!(config.file_check_ttl(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = DispatchConfig::from_yaml("file_check_ttl_secs: 5\n").unwrap();

        assert!(!config.debug);
        assert_eq!(config.file_check_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn test_empty_yaml_document() {
        let config = DispatchConfig::from_yaml("{}").unwrap();

        assert_eq!(config.max_forwards, None);
    }
}
