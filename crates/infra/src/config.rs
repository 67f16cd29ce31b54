//! Configuration loading and representation.
//!
//! Everything comes from process environment variables with development
//! defaults. Lookups go through a function so tests can supply a map instead
//! of mutating the real environment.

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("persistent store requested but no database URL could be resolved (set DATABASE_URL or DB_PROTOCOL/DB_USER/DB_PASS/DB_HOST)")]
    MissingDatabaseUrl,
}

/// Log output flavour.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Which movie store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub log_format: LogFormat,
    pub store: StoreBackend,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = match lookup("HOST") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { var: "HOST", value: v })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { var: "PORT", value: v })?,
            None => 3000,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                });
            }
        };

        let use_persistent = lookup("USE_PERSISTENT_STORES")
            .map(|v| v.parse::<bool>().unwrap_or(false))
            .unwrap_or(false);

        let store = if use_persistent {
            let url = database_url(&lookup).ok_or(ConfigError::MissingDatabaseUrl)?;
            StoreBackend::Postgres { url }
        } else {
            StoreBackend::InMemory
        };

        Ok(Self {
            host,
            port,
            log_format,
            store,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            log_format: LogFormat::Json,
            store: StoreBackend::InMemory,
        }
    }
}

/// `DATABASE_URL` wins; otherwise compose one from the `DB_*` parts. Only in
/// the development environment is the database name appended to the URL.
fn database_url<F>(lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL") {
        return Some(url);
    }

    let env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
    let protocol = lookup("DB_PROTOCOL")?;
    let user = lookup("DB_USER")?;
    let pass = lookup("DB_PASS")?;
    let host = lookup("DB_HOST")?;

    if env == "development" {
        let name = lookup("DB_NAME")?;
        Some(format!("{protocol}://{user}:{pass}@{host}/{name}"))
    } else {
        Some(format!("{protocol}://{user}:{pass}@{host}"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_to_in_memory_on_port_3000() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_host_port_and_log_format() {
        let cfg = config(&[("HOST", "127.0.0.1"), ("PORT", "8081"), ("LOG_FORMAT", "pretty")]).unwrap();
        assert_eq!(cfg.bind_addr().to_string(), "127.0.0.1:8081");
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_bad_port() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "PORT",
                value: "eighty".into()
            }
        );
    }

    #[test]
    fn database_url_takes_precedence() {
        let cfg = config(&[
            ("USE_PERSISTENT_STORES", "true"),
            ("DATABASE_URL", "postgres://u:p@db/movies"),
            ("DB_PROTOCOL", "ignored"),
        ])
        .unwrap();
        assert_eq!(
            cfg.store,
            StoreBackend::Postgres {
                url: "postgres://u:p@db/movies".into()
            }
        );
    }

    #[test]
    fn composes_url_with_name_in_development() {
        let parts = [
            ("USE_PERSISTENT_STORES", "true"),
            ("DB_PROTOCOL", "postgres"),
            ("DB_USER", "u"),
            ("DB_PASS", "p"),
            ("DB_HOST", "db:5432"),
            ("DB_NAME", "movies"),
        ];
        let cfg = config(&parts).unwrap();
        assert_eq!(
            cfg.store,
            StoreBackend::Postgres {
                url: "postgres://u:p@db:5432/movies".into()
            }
        );

        let mut prod = parts.to_vec();
        prod.push(("APP_ENV", "production"));
        let cfg = config(&prod).unwrap();
        assert_eq!(
            cfg.store,
            StoreBackend::Postgres {
                url: "postgres://u:p@db:5432".into()
            }
        );
    }

    #[test]
    fn persistent_without_url_is_an_error() {
        let err = config(&[("USE_PERSISTENT_STORES", "true"), ("DB_USER", "u")]).unwrap_err();
        assert_eq!(err, ConfigError::MissingDatabaseUrl);
    }
}
