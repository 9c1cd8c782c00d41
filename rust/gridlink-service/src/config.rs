use std::env;
use std::net::SocketAddr;

use anyhow::{bail, Context};

pub const DEFAULT_PORT: u16 = 1102;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cell_size: f32,
    pub hover_offset: f32,
    pub tick_ms: u64,
    pub assets: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Build from any key lookup; unparseable numbers fall back to defaults.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = get("GRIDLINK_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = get("GRIDLINK_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let cell_size = get("GRIDLINK_CELL_SIZE")
            .and_then(|s| s.parse::<f32>().ok())
            .unwrap_or(1.0);
        let hover_offset = get("GRIDLINK_HOVER_OFFSET")
            .and_then(|s| s.parse::<f32>().ok())
            .unwrap_or(0.2);
        let tick_ms = get("GRIDLINK_TICK_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(16);
        let assets: Vec<String> = get("GRIDLINK_ASSETS")
            .map(|s| s.split(',').map(str::trim).filter(|a| !a.is_empty()).map(String::from).collect())
            .unwrap_or_default();
        let assets = if assets.is_empty() { vec!["building".to_string()] } else { assets };

        if !(cell_size.is_finite() && cell_size > 0.0) {
            bail!("GRIDLINK_CELL_SIZE must be positive, got {cell_size}");
        }

        Ok(Self { host, port, cell_size, hover_offset, tick_ms, assets })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
