use std::env;

use anyhow::{Context, anyhow};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres URL. `None` runs the server on the seeded in-memory store.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub auto_register: bool,
    pub cookie_secure: bool,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("APP_PORT") {
            Some(p) => p.parse::<u16>().with_context(|| format!("invalid APP_PORT {p:?}"))?,
            None => 3000,
        };
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("JWT_SECRET is not set"))?;
        let token_ttl_hours = match lookup("TOKEN_TTL_HOURS") {
            Some(v) => {
                let hours = v
                    .parse::<i64>()
                    .with_context(|| format!("invalid TOKEN_TTL_HOURS {v:?}"))?;
                if hours <= 0 {
                    return Err(anyhow!("TOKEN_TTL_HOURS must be positive"));
                }
                hours
            }
            None => 24,
        };
        let auto_register = parse_flag(&lookup, "AUTO_REGISTER", true)?;
        let cookie_secure = parse_flag(&lookup, "COOKIE_SECURE", false)?;
        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| "public".to_string());

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            token_ttl_hours,
            auto_register,
            cookie_secure,
            static_dir,
        })
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None => Ok(default),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some(other) => Err(anyhow!("invalid {key} {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = config_from(&[("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.token_ttl_hours, 24);
        assert!(config.auto_register);
        assert!(!config.cookie_secure);
        assert_eq!(config.static_dir, "public");
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = config_from(&[("APP_PORT", "8080")]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("APP_PORT", "8080"),
            ("TOKEN_TTL_HOURS", "2"),
            ("AUTO_REGISTER", "false"),
            ("COOKIE_SECURE", "1"),
        ])
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/shop"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_hours, 2);
        assert!(!config.auto_register);
        assert!(config.cookie_secure);
    }

    #[test]
    fn blank_database_url_means_memory_store() {
        let config = config_from(&[("JWT_SECRET", "s3cret"), ("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config_from(&[("JWT_SECRET", "s"), ("APP_PORT", "http")]).is_err());
        assert!(config_from(&[("JWT_SECRET", "s"), ("TOKEN_TTL_HOURS", "0")]).is_err());
        assert!(config_from(&[("JWT_SECRET", "s"), ("AUTO_REGISTER", "maybe")]).is_err());
    }
}
