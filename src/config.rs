// src/config.rs

use std::env;
use std::net::SocketAddr;
use dotenvy::dotenv;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Settings for the optional per-IP rate limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst_size: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    pub log_dir: String,
    /// Whether requests that do not say otherwise get sanitized.
    pub sanitize_by_default: bool,
    pub allowed_origins: Vec<String>,
    pub rate_limit: Option<RateLimit>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .expect("BIND_ADDR must be a socket address like 0.0.0.0:3000");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let sanitize_by_default = env::var("SANITIZE_BY_DEFAULT")
            .map(|v| parse_bool(&v).expect("SANITIZE_BY_DEFAULT must be true or false"))
            .unwrap_or(true);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let rate_limit = match (env::var("RATE_LIMIT_PER_SECOND"), env::var("RATE_LIMIT_BURST")) {
            (Ok(per_second), Ok(burst_size)) => Some(RateLimit {
                per_second: per_second
                    .parse()
                    .expect("RATE_LIMIT_PER_SECOND must be a positive integer"),
                burst_size: burst_size
                    .parse()
                    .expect("RATE_LIMIT_BURST must be a positive integer"),
            }),
            _ => None,
        };

        Self {
            bind_addr,
            rust_log,
            log_dir,
            sanitize_by_default,
            allowed_origins,
            rate_limit,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
