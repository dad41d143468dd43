use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;

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
    pub cors: CorsConfig,
    pub artifacts: ArtifactConfig,
    pub trend: TrendConfig,
    pub catalog: CatalogConfig,
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

        let allowed_origins = match env::var("APP_CORS_ORIGINS") {
            Ok(raw) => parse_origin_list(&raw),
            Err(_) => CorsConfig::default_origins(),
        };

        let artifacts_dir =
            PathBuf::from(env::var("ARTIFACTS_DIR").unwrap_or_else(|_| "artifacts".to_string()));
        let dataset = PathBuf::from(
            env::var("STOCK_DATASET").unwrap_or_else(|_| "data/stock_history.csv".to_string()),
        );

        let base_url = env::var("SUPABASE_URL").ok();
        let service_key = env::var("SUPABASE_KEY").ok();

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            cors: CorsConfig { allowed_origins },
            artifacts: ArtifactConfig { dir: artifacts_dir },
            trend: TrendConfig { dataset },
            catalog: CatalogConfig {
                base_url,
                service_key,
            },
        })
    }
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Browser origins allowed to call the service.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// The storefront origins the service ships with when none are configured.
    pub fn default_origins() -> Vec<String> {
        vec![
            "http://localhost".to_string(),
            "http://localhost:8000".to_string(),
            "http://localhost:5173".to_string(),
        ]
    }

    /// Validated header values for the CORS layer.
    pub fn origin_values(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidCorsOrigin {
                    origin: origin.clone(),
                })
            })
            .collect()
    }
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Location of the fitted artifact files.
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub dir: PathBuf,
}

/// Location of the stock history export backing the trend endpoint.
#[derive(Debug, Clone)]
pub struct TrendConfig {
    pub dataset: PathBuf,
}

/// Hosted table store credentials. Optional at load time so demos and tests
/// can run without them; `credentials` enforces presence at serve time.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: Option<String>,
    pub service_key: Option<String>,
}

impl CatalogConfig {
    pub fn credentials(&self) -> Result<CatalogCredentials, ConfigError> {
        let base_url = self
            .base_url
            .clone()
            .ok_or(ConfigError::MissingSupabaseUrl)?;
        let service_key = self
            .service_key
            .clone()
            .ok_or(ConfigError::MissingSupabaseKey)?;
        Ok(CatalogCredentials {
            base_url,
            service_key,
        })
    }
}

/// Resolved table store connection values.
#[derive(Debug, Clone)]
pub struct CatalogCredentials {
    pub base_url: String,
    pub service_key: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCorsOrigin { origin: String },
    MissingSupabaseUrl,
    MissingSupabaseKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCorsOrigin { origin } => {
                write!(f, "APP_CORS_ORIGINS entry '{}' is not a valid origin", origin)
            }
            ConfigError::MissingSupabaseUrl => {
                write!(f, "SUPABASE_URL is required to reach the product catalog")
            }
            ConfigError::MissingSupabaseKey => {
                write!(f, "SUPABASE_KEY is required to reach the product catalog")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidCorsOrigin { .. }
            | ConfigError::MissingSupabaseUrl
            | ConfigError::MissingSupabaseKey => None,
        }
    }
}
