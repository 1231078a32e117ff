use crate::config::get_config;
use crate::error::Result;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

pub async fn create_pool() -> Result<PgPool> {
    let config = get_config();
    let mut options = PgConnectOptions::from_str(&config.database_url)?;
    // DATABASE_ECHO keeps sqlx's per-statement logging; off by default.
    if !config.database_echo {
        options = options.disable_statement_logging();
    }
    let pool = PgPoolOptions::new()
        .max_connections(50)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect_with(options)
        .await?;
    Ok(pool)
}
