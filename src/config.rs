use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::limiter::DEFAULT_MAX_CONCURRENT;

#[derive(Debug, Clone, Parser)]
#[command(name = "clients-gate", about = "Clients endpoint behind an admission limiter")]
pub struct ServerConfig {
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// HTTP worker threads
    #[arg(long, default_value = "4")]
    pub workers: NonZeroUsize,

    /// Units of work allowed in flight at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: usize,

    /// Fan each clients request out into units of work before responding
    #[arg(long)]
    pub fan_out: bool,

    #[arg(long, default_value_t = 10)]
    pub fan_out_width: usize,

    #[arg(long, default_value_t = 1000)]
    pub work_delay_ms: u64,

    #[arg(long, default_value = "./static")]
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn fan_out_settings(&self) -> FanOutSettings {
        FanOutSettings {
            enabled: self.fan_out,
            width: self.fan_out_width,
            work_delay: Duration::from_millis(self.work_delay_ms),
        }
    }
}

/// How the clients endpoint spreads a request into units of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOutSettings {
    pub enabled: bool,
    pub width: usize,
    pub work_delay: Duration,
}

impl Default for FanOutSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 10,
            work_delay: crate::worker::DEFAULT_WORK_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_server() {
        let config = ServerConfig::parse_from(["clients-gate"]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.workers.get(), 4);
        assert_eq!(config.max_concurrent, 3);
        assert_eq!(config.static_dir, PathBuf::from("./static"));
        assert_eq!(config.fan_out_settings(), FanOutSettings::default());
    }

    #[test]
    fn fan_out_flags() {
        let config = ServerConfig::parse_from([
            "clients-gate",
            "--fan-out",
            "--fan-out-width",
            "4",
            "--work-delay-ms",
            "50",
            "--port",
            "9090",
        ]);
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.fan_out_settings(),
            FanOutSettings {
                enabled: true,
                width: 4,
                work_delay: Duration::from_millis(50),
            }
        );
    }

    #[test]
    fn rejects_zero_workers() {
        assert!(ServerConfig::try_parse_from(["clients-gate", "--workers", "0"]).is_err());
        let config = ServerConfig::try_parse_from(["clients-gate", "--workers", "2"]).unwrap();
        assert_eq!(config.workers.get(), 2);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(ServerConfig::try_parse_from(["clients-gate", "--port", "http"]).is_err());
    }
}
