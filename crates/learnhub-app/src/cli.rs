//! CLI argument definitions for the LearnHub server.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

pub const ENV_CONFIG: &str = "LEARNHUB_CONFIG";
pub const ENV_PORT: &str = "LEARNHUB_PORT";

const DEFAULT_PORT: u16 = 3040;

/// LearnHub: course catalog and AI learning assistant API.
#[derive(Parser, Debug)]
#[command(name = "learnhub", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// API server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Priority: --config > LEARNHUB_CONFIG > ~/.learnhub/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var(ENV_CONFIG) {
            if !p.trim().is_empty() {
                return PathBuf::from(p);
            }
        }
        default_config_path()
    }

    /// Priority: --port > LEARNHUB_PORT > config file value > 3040.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var(ENV_PORT) {
            match val.parse::<u16>() {
                Ok(p) => return p,
                Err(_) => tracing::warn!(value = %val, "Ignoring invalid {}", ENV_PORT),
            }
        }
        if config_port != 0 {
            return config_port;
        }
        DEFAULT_PORT
    }

    /// Priority: --log-level > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".learnhub").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".learnhub").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("learnhub").chain(args.iter().copied()))
    }

    #[test]
    fn test_flags_parse() {
        let args = parse(&["--config", "/tmp/lh.toml", "-p", "8080", "--log-level", "debug"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/lh.toml")));
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_config_flag_wins() {
        let args = parse(&["-c", "custom.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_port_flag_wins_over_config() {
        let args = parse(&["--port", "9000"]);
        assert_eq!(args.resolve_port(3040), 9000);
    }

    #[test]
    fn test_log_level_falls_back_to_config() {
        assert_eq!(parse(&[]).resolve_log_level("warn"), "warn");
        assert_eq!(parse(&["-l", "trace"]).resolve_log_level("warn"), "trace");
    }

    #[test]
    fn test_default_config_path_file_name() {
        assert!(default_config_path().ends_with("config.toml"));
    }
}
