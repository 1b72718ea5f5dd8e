use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    pub security: SecurityConfig,

    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_url: String,

    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/campusdesk.db".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Signing secret for access tokens
    pub jwt_secret: String,

    /// Signing secret for refresh tokens, must differ from `jwt_secret`
    pub jwt_refresh_secret: String,

    pub access_token_minutes: i64,

    pub refresh_token_days: i64,

    /// Minimum password length in characters. No complexity rules apply.
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-access-secret".to_string(),
            jwt_refresh_secret: "change-me-refresh-secret".to_string(),
            access_token_minutes: 15,
            refresh_token_days: 7,
            password_min_length: 6,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_refresh_secret", &"<redacted>")
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .field("password_min_length", &self.password_min_length)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB (default: 8192 = 8MB)
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations) - higher = more CPU work
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Length of the fixed counting window.
    pub window_seconds: u64,

    /// Requests allowed per client within one window on the public auth routes.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_seconds: 15 * 60,
            max_requests: 100,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            security: SecurityConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Config {
    /// Loads defaults, then the first config file found, then environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// The config file `load` reads, if one exists.
    #[must_use]
    pub fn source_path() -> Option<PathBuf> {
        first_existing(Self::config_paths())
    }

    fn load_file() -> Result<Self> {
        match Self::source_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    /// Applies the environment variables understood by the server.
    ///
    /// `lookup` is injected so tests do not have to mutate the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.general.database_url = url;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.general.log_level = level;
        }
        if let Some(port) = parse_env(&lookup, "PORT")? {
            self.server.port = port;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(secret) = lookup("JWT_REFRESH_SECRET") {
            self.auth.jwt_refresh_secret = secret;
        }
        if let Some(minutes) = parse_env(&lookup, "JWT_EXPIRES_MINUTES")? {
            self.auth.access_token_minutes = minutes;
        }
        if let Some(days) = parse_env(&lookup, "JWT_REFRESH_EXPIRES_DAYS")? {
            self.auth.refresh_token_days = days;
        }
        if let Some(cost) = parse_env(&lookup, "ARGON2_TIME_COST")? {
            self.security.argon2_time_cost = cost;
        }
        if let Some(window) = parse_env(&lookup, "RATE_LIMIT_WINDOW_SECONDS")? {
            self.rate_limit.window_seconds = window;
        }
        if let Some(max) = parse_env(&lookup, "RATE_LIMIT_MAX")? {
            self.rate_limit.max_requests = max;
        }

        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("campusdesk").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".campusdesk").join("config.toml"));
        }

        paths
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Writes a default config with freshly generated token secrets.
    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            return Ok(false);
        }

        let mut config = Self::default();
        config.auth.jwt_secret = generate_secret();
        config.auth.jwt_refresh_secret = generate_secret();
        config.save_to_path(&path)?;
        info!("Created default config file: {}", path.display());
        Ok(true)
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() || self.auth.jwt_refresh_secret.is_empty() {
            anyhow::bail!("JWT secrets cannot be empty");
        }

        if self.auth.jwt_secret == self.auth.jwt_refresh_secret {
            anyhow::bail!("Access and refresh token secrets must differ");
        }

        if self.auth.access_token_minutes <= 0 || self.auth.refresh_token_days <= 0 {
            anyhow::bail!("Token expirations must be positive");
        }

        if self.auth.password_min_length == 0 {
            anyhow::bail!("Minimum password length must be at least 1");
        }

        if self.general.max_db_connections < self.general.min_db_connections {
            anyhow::bail!("max_db_connections must be >= min_db_connections");
        }

        if self.rate_limit.enabled
            && (self.rate_limit.window_seconds == 0 || self.rate_limit.max_requests == 0)
        {
            anyhow::bail!("Rate limit window and max requests must be > 0 when enabled");
        }

        Ok(())
    }
}

fn parse_env<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {key}: {raw}"))
        })
        .transpose()
}

/// Random 64 character hex string.
fn generate_secret() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

fn first_existing(paths: Vec<PathBuf>) -> Option<PathBuf> {
    paths.into_iter().find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.auth.access_token_minutes, 15);
        assert_eq!(config.auth.refresh_token_days, 7);
        assert_eq!(config.auth.password_min_length, 6);
        assert_eq!(config.server.port, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_first_existing_skips_missing_paths() {
        let dir = std::env::temp_dir().join(format!("campusdesk-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let present = dir.join("config.toml");
        Config::default().save_to_path(&present).unwrap();

        let missing = dir.join("missing.toml");
        assert_eq!(
            first_existing(vec![missing.clone(), present.clone()]),
            Some(present.clone())
        );
        assert_eq!(first_existing(vec![missing]), None);
        assert!(Config::load_from_path(&present).is_ok());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [rate_limit]
            max_requests = 10
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_seconds, 900);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "8081"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_EXPIRES_MINUTES", "30"),
            ("RATE_LIMIT_MAX", "5"),
        ]);

        let mut config = Config::default();
        config
            .apply_env_overrides(|key| env.get(key).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.general.database_url, "sqlite::memory:");
        assert_eq!(config.auth.access_token_minutes, 30);
        assert_eq!(config.rate_limit.max_requests, 5);
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(|key| (key == "PORT").then(|| "abc".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_shared_secret() {
        let mut config = Config::default();
        config.auth.jwt_refresh_secret = config.auth.jwt_secret.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generated_secret_shape() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
