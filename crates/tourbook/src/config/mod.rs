use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::site::locale::{LocaleSet, LocaleSetError, LocaleTag};
use crate::site::urls::{SiteUrlError, SiteUrls};
use crate::telemetry::LogFormat;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the site service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub site: SiteConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        let base_url =
            env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let default_locale = env::var("SITE_DEFAULT_LOCALE").unwrap_or_else(|_| "es".to_string());
        let locales = split_list(&env::var("SITE_LOCALES").unwrap_or_else(|_| "en,fr".to_string()));
        let catalog_csv = env::var("CATALOG_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            site: SiteConfig {
                base_url,
                default_locale,
                locales,
                catalog_csv,
            },
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Public site identity: where it is served from and which locales it speaks.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub default_locale: String,
    /// Alternate locales, each served under its own path prefix.
    pub locales: Vec<String>,
    pub catalog_csv: Option<PathBuf>,
}

impl SiteConfig {
    pub fn locale_set(&self) -> Result<LocaleSet, ConfigError> {
        let alternates = self.locales.iter().cloned().map(LocaleTag::new).collect();
        LocaleSet::new(LocaleTag::new(self.default_locale.clone()), alternates)
            .map_err(ConfigError::Locales)
    }

    pub fn site_urls(&self) -> Result<SiteUrls, ConfigError> {
        let locales = self.locale_set()?;
        SiteUrls::new(&self.base_url, locales).map_err(ConfigError::BaseUrl)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    Locales(LocaleSetError),
    BaseUrl(SiteUrlError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::Locales(err) => write!(f, "SITE_LOCALES is invalid: {err}"),
            ConfigError::BaseUrl(err) => write!(f, "SITE_BASE_URL is invalid: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Locales(err) => Some(err),
            ConfigError::BaseUrl(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "SITE_BASE_URL",
            "SITE_DEFAULT_LOCALE",
            "SITE_LOCALES",
            "CATALOG_CSV",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(config.site.default_locale, "es");
        assert_eq!(config.site.locales, vec!["en".to_string(), "fr".to_string()]);
        assert!(config.site.catalog_csv.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn locale_list_ignores_blank_items() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SITE_LOCALES", " en, ,fr ,de");
        let config = AppConfig::load().expect("config loads");
        let locales = config.site.locale_set().expect("valid locale set");
        assert_eq!(locales.default_locale().as_str(), "es");
        assert_eq!(locales.alternates().len(), 3);
        reset_env();
    }

    #[test]
    fn default_locale_cannot_also_be_an_alternate() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SITE_LOCALES", "en,es");
        let config = AppConfig::load().expect("config loads");
        let err = config.site.locale_set().expect_err("default listed twice");
        assert!(matches!(err, ConfigError::Locales(_)));
        reset_env();
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SITE_BASE_URL", "/not-absolute");
        let config = AppConfig::load().expect("config loads");
        let err = config.site.site_urls().expect_err("relative base");
        assert!(matches!(err, ConfigError::BaseUrl(_)));
        reset_env();
    }
}
