use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::external::stockanalysis::DEFAULT_BASE_URL;
use crate::services::financials_cache::DEFAULT_TTL_SECS;
use crate::services::financials_service::DEFAULT_PACING;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("NAPKIN_SOURCE_BASE_URL must be an http(s) URL, got {0}")]
    BaseUrl(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source_base_url: String,
    pub cache_ttl_secs: i64,
    pub fetch_pacing_ms: u64,
    pub fetch_timeout_secs: u64,
    pub bind_addr: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl_secs: DEFAULT_TTL_SECS,
            fetch_pacing_ms: DEFAULT_PACING.as_millis() as u64,
            fetch_timeout_secs: 30,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            source_base_url: lookup("NAPKIN_SOURCE_BASE_URL")
                .unwrap_or(defaults.source_base_url),
            cache_ttl_secs: parse_var(&lookup, "NAPKIN_CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            fetch_pacing_ms: parse_var(&lookup, "NAPKIN_FETCH_PACING_MS", defaults.fetch_pacing_ms)?,
            fetch_timeout_secs: parse_var(
                &lookup,
                "NAPKIN_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout_secs,
            )?,
            bind_addr: parse_var(&lookup, "NAPKIN_BIND_ADDR", defaults.bind_addr)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(self.source_base_url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::BaseUrl(self.source_base_url.clone())),
        }
        if self.cache_ttl_secs <= 0 {
            return Err(ConfigError::Zero("NAPKIN_CACHE_TTL_SECS"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Zero("NAPKIN_FETCH_TIMEOUT_SECS"));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache_ttl_secs)
    }

    pub fn fetch_pacing(&self) -> Duration {
        Duration::from_millis(self.fetch_pacing_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.source_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_ttl(), chrono::Duration::seconds(3600));
        assert_eq!(config.fetch_pacing(), Duration::from_millis(1500));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("NAPKIN_SOURCE_BASE_URL", "http://127.0.0.1:9000/ngx"),
            ("NAPKIN_CACHE_TTL_SECS", "60"),
            ("NAPKIN_FETCH_PACING_MS", "0"),
            ("NAPKIN_BIND_ADDR", "127.0.0.1:3001"),
        ])
        .unwrap();
        assert_eq!(config.source_base_url, "http://127.0.0.1:9000/ngx");
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.fetch_pacing(), Duration::ZERO);
        assert_eq!(config.bind_addr, "127.0.0.1:3001".parse().unwrap());
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config_from(&[("NAPKIN_CACHE_TTL_SECS", "soon")]).unwrap_err(),
            ConfigError::Invalid {
                name: "NAPKIN_CACHE_TTL_SECS",
                value: "soon".to_string()
            }
        );
        assert_eq!(
            config_from(&[("NAPKIN_CACHE_TTL_SECS", "0")]).unwrap_err(),
            ConfigError::Zero("NAPKIN_CACHE_TTL_SECS")
        );
        assert!(matches!(
            config_from(&[("NAPKIN_SOURCE_BASE_URL", "stockanalysis.com")]),
            Err(ConfigError::BaseUrl(_))
        ));
    }
}
