//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::SameSite;
use base64::Engine;
use base64::engine::general_purpose;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Application configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub database: DatabaseConfig,
    pub frontend_origins: Vec<String>,
    /// Decoded `SESSION_SECRET`
    session_secret: Option<Vec<u8>>,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    password_pepper: Option<Vec<u8>>,
}

/// Connection settings. A full `DATABASE_URL` wins over the parts.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let session_secret = env::var("SESSION_SECRET")
            .ok()
            .map(|s| general_purpose::STANDARD.decode(s.trim()))
            .transpose()
            .context("SESSION_SECRET must be standard base64")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("HTTP_PORT", 8080),
            request_timeout: Duration::from_secs(parse_or("HTTP_REQUEST_TIMEOUT_SECS", 30)),
            database: DatabaseConfig::from_env(),
            frontend_origins,
            session_secret,
            cookie_secure: parse_or("COOKIE_SECURE", !cfg!(debug_assertions)),
            cookie_same_site: env::var("COOKIE_SAME_SITE")
                .ok()
                .and_then(|s| SameSite::parse(&s))
                .unwrap_or_default(),
            password_pepper: env::var("PASSWORD_PEPPER")
                .ok()
                .filter(|p| !p.is_empty())
                .map(String::into_bytes),
        })
    }

    /// Session signing and cookie settings.
    ///
    /// Debug builds fall back to a random secret, so sessions do not
    /// survive a restart.
    pub fn auth_config(&self) -> anyhow::Result<AuthConfig> {
        let config = match &self.session_secret {
            Some(secret) => AuthConfig::new(secret)?,
            None if cfg!(debug_assertions) => {
                tracing::warn!("SESSION_SECRET not set, using a random development secret");
                AuthConfig::development()?
            }
            None => bail!("SESSION_SECRET must be set in release builds"),
        };

        let mut cookie = config.cookie.clone();
        cookie.secure = self.cookie_secure;
        cookie.same_site = self.cookie_same_site;

        Ok(config
            .with_cookie(cookie)
            .with_pepper(self.password_pepper.clone()))
    }
}

impl DatabaseConfig {
    fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()),
            host: env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: parse_or("POSTGRES_PORT", 5432),
            user: env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: env::var("POSTGRES_PASSWORD").unwrap_or_default(),
            name: env::var("POSTGRES_DB").unwrap_or_else(|_| "blog".to_string()),
            ssl_mode: env::var("POSTGRES_SSLMODE").unwrap_or_else(|_| "prefer".to_string()),
            max_connections: parse_or("DB_MAX_CONNECTIONS", 5),
        }
    }

    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).context("invalid DATABASE_URL");
        }

        let ssl_mode = PgSslMode::from_str(&self.ssl_mode)
            .with_context(|| format!("invalid POSTGRES_SSLMODE: {}", self.ssl_mode))?;

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(ssl_mode))
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
