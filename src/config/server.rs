use std::env;
use std::thread;

use crate::config::parse_or;
use crate::core::Result;

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: var("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or("SERVER_PORT", var("SERVER_PORT"), 8080)?,
            workers: parse_or("SERVER_WORKERS", var("SERVER_WORKERS"), default_workers())?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Handlers mostly wait on MySQL; two workers per core
fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|cores| cores.get() * 2)
        .unwrap_or(2)
}
