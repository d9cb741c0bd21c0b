use std::env;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Base URL of the remote notes collection, including the `/notes` path.
    pub const API_URL: &str = "NOTES_API_URL";
    /// Origin the public share links are built on (e.g. "https://notes.example.com").
    pub const PUBLIC_ORIGIN: &str = "NOTES_PUBLIC_ORIGIN";
    pub const REQUEST_TIMEOUT_SECS: &str = "NOTES_REQUEST_TIMEOUT_SECS";
}

/// Default values
pub mod defaults {
    pub const API_URL: &str = "http://localhost:9110/notes";
    pub const PUBLIC_ORIGIN: &str = "http://localhost:3000";
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub public_origin: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: defaults::API_URL.to_string(),
            public_origin: defaults::PUBLIC_ORIGIN.to_string(),
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup(env_vars::REQUEST_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!(
                    "{} must be a whole number of seconds, got {:?}; using {}",
                    env_vars::REQUEST_TIMEOUT_SECS,
                    raw,
                    defaults::REQUEST_TIMEOUT_SECS
                );
                defaults::REQUEST_TIMEOUT_SECS
            }),
            None => defaults::REQUEST_TIMEOUT_SECS,
        };

        Self {
            api_url: lookup(env_vars::API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| defaults::API_URL.to_string()),
            public_origin: lookup(env_vars::PUBLIC_ORIGIN)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| defaults::PUBLIC_ORIGIN.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_public_origin(mut self, origin: impl Into<String>) -> Self {
        self.public_origin = origin.into().trim_end_matches('/').to_string();
        self
    }
}
