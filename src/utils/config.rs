use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_PAGE_SIZE: i32 = 50;
/// Page size used when a request leaves `max` out
pub const DEFAULT_PAGE_SIZE: i32 = 10;

const BIND_ADDRESS_VAR: &str = "SCOPEGUIDE_BIND_ADDRESS";
const MAX_PAGE_SIZE_VAR: &str = "SCOPEGUIDE_MAX_PAGE_SIZE";
const ALLOWED_ORIGIN_VAR: &str = "SCOPEGUIDE_ALLOWED_ORIGIN";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SCOPEGUIDE_BIND_ADDRESS must be a socket address, got `{0}`")]
    InvalidBindAddress(String),

    #[error("SCOPEGUIDE_MAX_PAGE_SIZE must be a positive integer, got `{0}`")]
    InvalidMaxPageSize(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationConfiguration {
    pub bind_address: SocketAddr,
    pub max_page_size: i32,
    pub allowed_origin: Option<String>,
}

impl ApplicationConfiguration {
    /// Reads the configuration from the process environment, after loading `.env` if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_address = lookup(BIND_ADDRESS_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_address
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddress(bind_address))?;

        let max_page_size = match lookup(MAX_PAGE_SIZE_VAR) {
            Some(value) => match value.trim().parse::<i32>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidMaxPageSize(value)),
            },
            None => DEFAULT_MAX_PAGE_SIZE,
        };

        let allowed_origin = lookup(ALLOWED_ORIGIN_VAR).filter(|origin| !origin.is_empty());

        Ok(Self {
            bind_address,
            max_page_size,
            allowed_origin,
        })
    }

    /// Number of rows a list request may return, given its `max` argument
    pub fn page_size(&self, max: Option<i32>) -> i32 {
        max.unwrap_or(DEFAULT_PAGE_SIZE).min(self.max_page_size)
    }
}

impl Default for ApplicationConfiguration {
    fn default() -> Self {
        Self {
            bind_address: ([127, 0, 0, 1], 8080).into(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            allowed_origin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ApplicationConfiguration::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApplicationConfiguration::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = ApplicationConfiguration::from_lookup(lookup(&[
            ("SCOPEGUIDE_BIND_ADDRESS", "0.0.0.0:3000"),
            ("SCOPEGUIDE_MAX_PAGE_SIZE", "20"),
            ("SCOPEGUIDE_ALLOWED_ORIGIN", "https://example.org"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.max_page_size, 20);
        assert_eq!(config.allowed_origin.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            ApplicationConfiguration::from_lookup(lookup(&[("SCOPEGUIDE_BIND_ADDRESS", "nowhere")])),
            Err(ConfigError::InvalidBindAddress("nowhere".to_string()))
        );
        for value in ["0", "-4", "many"] {
            assert_eq!(
                ApplicationConfiguration::from_lookup(lookup(&[("SCOPEGUIDE_MAX_PAGE_SIZE", value)])),
                Err(ConfigError::InvalidMaxPageSize(value.to_string()))
            );
        }
    }

    #[test]
    fn error_names_the_variable() {
        let error = ConfigError::InvalidMaxPageSize("0".to_string());
        assert_eq!(
            error.to_string(),
            "SCOPEGUIDE_MAX_PAGE_SIZE must be a positive integer, got `0`"
        );
    }

    #[test]
    fn page_size_is_capped() {
        let config = ApplicationConfiguration {
            max_page_size: 20,
            ..ApplicationConfiguration::default()
        };

        assert_eq!(config.page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(config.page_size(Some(5)), 5);
        assert_eq!(config.page_size(Some(500)), 20);

        let small = ApplicationConfiguration {
            max_page_size: 3,
            ..ApplicationConfiguration::default()
        };
        assert_eq!(small.page_size(None), 3);
    }
}
