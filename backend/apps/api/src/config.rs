//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;
use platform::password::HashConfig;
use platform::proxy::TrustedProxies;

/// Callers trusted when `AUTH_TRUSTED_PROXIES` is unset
pub const DEFAULT_TRUSTED_PROXIES: &str = "127.0.0.1,::1";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty list disables the gate
    pub trusted_proxies: TrustedProxies,
    pub bootstrap_file: PathBuf,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load from process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HashConfig::default();
        let hash = HashConfig::new(
            parse_or(&lookup, "ARGON2_MEMORY_KIB", defaults.memory_kib())?,
            parse_or(&lookup, "ARGON2_ITERATIONS", defaults.iterations())?,
            parse_or(&lookup, "ARGON2_PARALLELISM", defaults.parallelism())?,
            parse_or(&lookup, "ARGON2_SALT_LENGTH", defaults.salt_length())?,
            parse_or(&lookup, "ARGON2_KEY_LENGTH", defaults.key_length())?,
        )
        .context("invalid Argon2 parameters")?;

        let auth_defaults = AuthConfig::default();
        let auth = AuthConfig {
            token_ttl: Duration::from_secs(parse_or(
                &lookup,
                "AUTH_TOKEN_TTL_SECS",
                auth_defaults.token_ttl_secs(),
            )?),
            max_concurrent_hashes: parse_or(
                &lookup,
                "AUTH_MAX_CONCURRENT_HASHES",
                auth_defaults.max_concurrent_hashes,
            )?,
            hash,
            ..auth_defaults
        };

        // Set-but-empty is meaningful: it disables the gate
        let trusted_proxies = TrustedProxies::from_csv(
            &lookup("AUTH_TRUSTED_PROXIES").unwrap_or_else(|| DEFAULT_TRUSTED_PROXIES.to_string()),
        );

        Ok(Self {
            host: lookup("AUTH_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(&lookup, "AUTH_PORT", 8081)?,
            trusted_proxies,
            bootstrap_file: lookup("AUTH_BOOTSTRAP_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("config.json")),
            auth,
        })
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}
