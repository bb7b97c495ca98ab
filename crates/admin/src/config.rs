//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PORTAL_HOST` - Bind address (default: 127.0.0.1)
//! - `PORTAL_PORT` - Listen port (default: 3001)
//! - `PORTAL_BASE_URL` - Public URL (default: <http://localhost:3001>); `https://` enables secure cookies
//! - `PORTAL_LOGIN_DELAY_MS` - Simulated sign-in latency (default: 800)
//! - `PORTAL_LOG_JSON` - Emit JSON logs when set
//! - `GEMINI_API_KEY` - Text generation API key (without it every generation falls back)
//! - `GEMINI_MODEL` - Model ID (default: gemini-3-flash-preview)
//! - `GEMINI_BASE_URL` - API base (default: <https://generativelanguage.googleapis.com>)
//! - `GEMINI_TEMPERATURE` - Sampling temperature (default: 0.7)
//! - `GEMINI_MAX_OUTPUT_TOKENS` - Output bound (default: 100)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`
//!
//! ## Optional (TLS)
//! - `PORTAL_TLS_CERT` - PEM-encoded certificate chain
//! - `PORTAL_TLS_KEY` - PEM-encoded private key

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::gemini::GenerationConfig;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 100;
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(800);
const DEFAULT_PORT: u16 = 3001;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Portal application configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the portal
    pub base_url: String,
    /// Artificial latency of the mock sign-in
    pub login_delay: Duration,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Text generation configuration
    pub gemini: GeminiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// Text generation (Gemini) configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; `None` disables remote generation
    pub api_key: Option<SecretString>,
    /// Model ID (e.g., gemini-3-flash-preview)
    pub model: String,
    /// API base URL
    pub base_url: Url,
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: default_gemini_base_url(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

#[allow(clippy::expect_used)]
fn default_gemini_base_url() -> Url {
    Url::parse(DEFAULT_GEMINI_BASE_URL).expect("default Gemini base URL is valid")
}

impl GeminiConfig {
    /// Sampling settings sent with every request.
    #[must_use]
    pub const fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let api_key = get_optional_env("GEMINI_API_KEY").map(|key| {
            if let Err(e) = validate_secret_strength(&key, "GEMINI_API_KEY") {
                tracing::warn!("GEMINI_API_KEY validation warning: {e}");
            }
            SecretString::from(key)
        });
        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; description generation will use fallbacks");
        }

        let base_url = get_env_or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
        let base_url = Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("GEMINI_BASE_URL".to_string(), e.to_string()))?;

        let temperature = parse_env_or("GEMINI_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidEnvVar(
                "GEMINI_TEMPERATURE".to_string(),
                format!("must be between 0.0 and 2.0 (got {temperature})"),
            ));
        }

        Ok(Self {
            api_key,
            model: get_env_or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            base_url,
            temperature,
            max_output_tokens: parse_env_or("GEMINI_MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS)?,
        })
    }
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl TlsConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let cert_pem = get_optional_env("PORTAL_TLS_CERT");
        let key_pem = get_optional_env("PORTAL_TLS_KEY");

        match (cert_pem, key_pem) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "PORTAL_TLS_*".to_string(),
                "Both PORTAL_TLS_CERT and PORTAL_TLS_KEY must be set together".to_string(),
            )),
        }
    }
}

impl Default for PortalConfig {
    /// Local development defaults: loopback, no API key, no Sentry, no TLS.
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: format!("http://localhost:{DEFAULT_PORT}"),
            login_delay: DEFAULT_LOGIN_DELAY,
            log_json: false,
            gemini: GeminiConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            tls: None,
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("PORTAL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORTAL_HOST".to_string(), e.to_string()))?;
        let port = parse_env_or("PORTAL_PORT", DEFAULT_PORT)?;
        let base_url = get_env_or_default("PORTAL_BASE_URL", &format!("http://localhost:{port}"));
        Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("PORTAL_BASE_URL".to_string(), e.to_string()))?;
        let login_delay = Duration::from_millis(parse_env_or(
            "PORTAL_LOGIN_DELAY_MS",
            u64::try_from(DEFAULT_LOGIN_DELAY.as_millis()).unwrap_or(800),
        )?);

        Ok(Self {
            host,
            port,
            base_url,
            login_delay,
            log_json: get_optional_env("PORTAL_LOG_JSON").is_some(),
            gemini: GeminiConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_optional_env("SENTRY_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
            sentry_traces_sample_rate: get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
            tls: TlsConfig::from_env()?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the portal is served over HTTPS (controls secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Returns a reference to the text generation configuration.
    #[must_use]
    pub const fn gemini(&self) -> &GeminiConfig {
        &self.gemini
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable; empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an optional environment variable, falling back to `default`.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
