use std::net::SocketAddr;

use anyhow::Context;

const DEFAULT_PORT: u16 = 4000;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub graphql_depth_limit: usize,
    pub graphql_complexity_limit: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_port(std::env::var("PORT").ok().as_deref());

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let graphql_depth_limit: usize =
            std::env::var("GRAPHQL_DEPTH_LIMIT").ok().and_then(|s| s.parse().ok()).unwrap_or(32);

        let graphql_complexity_limit: usize = std::env::var("GRAPHQL_COMPLEXITY_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            graphql_depth_limit,
            graphql_complexity_limit,
        })
    }
}

/// Unset or unparsable values fall back to the default port.
fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(DEFAULT_PORT)
}
