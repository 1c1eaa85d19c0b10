//! Configuration module
//!
//! Settings come from the environment (optionally a `.env` file loaded by
//! `main` through dotenvy).

use std::net::SocketAddr;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Allow cross-origin requests from any origin
    pub cors_allow_any: bool,
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name} '{value}'")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    /// Read `HOST`, `PORT` and `CORS_ALLOW_ANY` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => defaults.port,
        };

        let cors_allow_any = match lookup("CORS_ALLOW_ANY") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "CORS_ALLOW_ANY",
                        value: raw,
                    })
                }
            },
            None => defaults.cors_allow_any,
        };

        Ok(Self {
            host,
            port,
            cors_allow_any,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.address().parse().map_err(|_| ConfigError::Invalid {
            name: "HOST",
            value: self.host.clone(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8088,
            cors_allow_any: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.address(), "127.0.0.1:8088");
        assert!(!config.cors_allow_any);
    }

    #[test]
    fn custom_config() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9100"),
            ("CORS_ALLOW_ANY", "true"),
        ]))
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9100);
        assert!(config.cors_allow_any);
        assert_eq!(config.socket_addr().unwrap().port(), 9100);
    }

    #[test]
    fn invalid_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid PORT 'eighty'");
    }

    #[test]
    fn invalid_host() {
        let config = Config::from_lookup(lookup(&[("HOST", "not a host")])).unwrap();
        assert!(config.socket_addr().is_err());
    }
}
