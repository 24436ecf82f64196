use crate::scoring::{ComplianceMetrics, MOCK_RISK_SCORE};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub assistant: AssistantConfig,
    pub tables: TableSources,
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

        let max_sessions = match env::var("APP_MAX_SESSIONS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidMaxSessions)?,
            Err(_) => DEFAULT_MAX_SESSIONS,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = env::var("APP_LOG_ANSI")
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let reply_delay_ms = match env::var("APP_RESPONSE_DELAY_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidResponseDelay)?,
            Err(_) => 1500,
        };

        let risk_score = match env::var("APP_RISK_SCORE") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidRiskScore)?,
            Err(_) => MOCK_RISK_SCORE,
        };

        let risk_concentration = env::var("APP_RISK_CONCENTRATION")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                max_sessions,
            },
            telemetry: TelemetryConfig { log_level, ansi },
            assistant: AssistantConfig {
                reply_delay: Duration::from_millis(reply_delay_ms),
                metrics: ComplianceMetrics::mock(),
                risk_score,
                risk_concentration,
            },
            tables: TableSources {
                role_directory: optional_path("APP_ROLE_DIRECTORY"),
                response_table: optional_path("APP_RESPONSE_TABLE"),
            },
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Live chat sessions kept before the oldest is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_sessions: usize,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Behavior of the canned assistant and the figures behind its dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    pub reply_delay: Duration,
    pub metrics: ComplianceMetrics,
    pub risk_score: i32,
    pub risk_concentration: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(1500),
            metrics: ComplianceMetrics::mock(),
            risk_score: MOCK_RISK_SCORE,
            risk_concentration: None,
        }
    }
}

/// Optional JSON replacements for the built-in role and response tables.
#[derive(Debug, Clone, Default)]
pub struct TableSources {
    pub role_directory: Option<PathBuf>,
    pub response_table: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidResponseDelay,
    InvalidRiskScore,
    InvalidMaxSessions,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidResponseDelay => {
                write!(f, "APP_RESPONSE_DELAY_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidRiskScore => write!(f, "APP_RISK_SCORE must be an integer"),
            ConfigError::InvalidMaxSessions => {
                write!(f, "APP_MAX_SESSIONS must be a positive whole number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidResponseDelay
            | ConfigError::InvalidRiskScore
            | ConfigError::InvalidMaxSessions => None,
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
            "APP_LOG_ANSI",
            "APP_RESPONSE_DELAY_MS",
            "APP_RISK_SCORE",
            "APP_RISK_CONCENTRATION",
            "APP_ROLE_DIRECTORY",
            "APP_RESPONSE_TABLE",
            "APP_MAX_SESSIONS",
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
        assert_eq!(config.server.max_sessions, DEFAULT_MAX_SESSIONS);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.ansi);
        assert_eq!(config.assistant, AssistantConfig::default());
        assert!(config.tables.role_directory.is_none());
        assert!(config.tables.response_table.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_assistant_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RESPONSE_DELAY_MS", "0");
        env::set_var("APP_RISK_SCORE", "42");
        env::set_var("APP_RISK_CONCENTRATION", "Risk concentrated in field crews");
        env::set_var("APP_ROLE_DIRECTORY", "/etc/pilot/roles.json");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.assistant.reply_delay, Duration::ZERO);
        assert_eq!(config.assistant.risk_score, 42);
        assert_eq!(
            config.assistant.risk_concentration.as_deref(),
            Some("Risk concentrated in field crews")
        );
        assert_eq!(
            config.tables.role_directory,
            Some(PathBuf::from("/etc/pilot/roles.json"))
        );
        reset_env();
    }

    #[test]
    fn rejects_malformed_delay() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RESPONSE_DELAY_MS", "soon");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidResponseDelay)
        ));
        reset_env();
    }

    #[test]
    fn rejects_zero_session_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_MAX_SESSIONS", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidMaxSessions)
        ));

        env::set_var("APP_MAX_SESSIONS", "25");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.server.max_sessions, 25);
        reset_env();
    }
}
