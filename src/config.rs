use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_bind_addr: String,
    pub default_chain: String,
    /// When set, overrides the per-endpoint simulated latency (0 disables it).
    pub sim_latency_ms: Option<u64>,
    /// When set, every request is generated from this seed (reproducible demos).
    pub rng_seed: Option<u64>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid {name} value {value:?}: expected a non-negative integer")]
    InvalidNumber { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_bind_addr = env::var("HTTP_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let default_chain = env::var("DEFAULT_CHAIN").unwrap_or_else(|_| "ethereum".to_string());
        let sim_latency_ms = parse_optional_u64("SIM_LATENCY_MS")?;
        let rng_seed = parse_optional_u64("RNG_SEED")?;

        Ok(Self {
            http_bind_addr,
            default_chain,
            sim_latency_ms,
            rng_seed,
        })
    }
}

fn parse_optional_u64(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(None),
    }
}
