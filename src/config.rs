use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_echo: bool,
    pub jwt_secret: String,
    pub cors_origins: String,
    pub uploads_dir: String,
    pub retell_api_key: Option<String>,
    pub retell_webhook_secret: Option<String>,
    pub retell_api_base_url: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            host: get_env_or("HOST", "0.0.0.0"),
            port: get_env_parse_or("PORT", 8000)?,
            database_url: get_env("DATABASE_URL")?,
            database_echo: get_env_bool("DATABASE_ECHO", false),
            jwt_secret: get_env("JWT_SECRET")?,
            cors_origins: get_env_or("CORS_ORIGINS", "*"),
            uploads_dir: get_env_or("UPLOADS_DIR", "./uploads"),
            retell_api_key: env::var("RETELL_API_KEY").ok(),
            retell_webhook_secret: env::var("RETELL_WEBHOOK_SECRET").ok(),
            retell_api_base_url: get_env_or("RETELL_API_BASE_URL", "https://api.retellai.com"),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CORS origins as configured, split on commas. `"*"` means allow all.
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_bool(name: &str, default: bool) -> bool {
    match env::var(name).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            host: "0.0.0.0".into(),
            port: 8000,
            database_url: "postgres://localhost/test".into(),
            database_echo: false,
            jwt_secret: "secret".into(),
            cors_origins: "*".into(),
            uploads_dir: "./uploads".into(),
            retell_api_key: None,
            retell_webhook_secret: None,
            retell_api_base_url: "https://api.retellai.com".into(),
        }
    }

    #[test]
    fn cors_origin_list_splits_on_commas() {
        let config = Config {
            cors_origins: "https://a.example.com, https://b.example.com".into(),
            ..sample_config()
        };
        assert_eq!(
            config.cors_origin_list(),
            vec![
                "https://a.example.com".to_string(),
                "https://b.example.com".to_string()
            ]
        );
    }

    #[test]
    fn server_address_joins_host_and_port() {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 9000,
            ..sample_config()
        };
        assert_eq!(config.server_address(), "127.0.0.1:9000");
    }
}
