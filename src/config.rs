//! Configuration for the resp-codec tool.
//!
//! Supports both command-line arguments and TOML configuration file.
//! CLI arguments take precedence over config file values.

use crate::resp::{ParserConfig, DEFAULT_MAX_DEPTH};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// What the tool does with stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Encode each input line as a RESP command array
    Encode,
    /// Decode RESP replies and print one value per line
    Decode,
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "resp-codec")]
#[command(version = "0.1.0")]
#[command(about = "Encode commands to RESP and decode RESP replies", long_about = None)]
pub struct CliArgs {
    /// Encode or decode
    #[arg(value_enum)]
    pub mode: Mode,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bytes read from input per chunk when decoding
    #[arg(short = 'b', long)]
    pub chunk_size: Option<usize>,

    /// Maximum array nesting depth when decoding
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Decoder-related configuration
#[derive(Debug, Deserialize)]
pub struct DecoderConfig {
    /// Bytes read per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Maximum array nesting depth
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            max_depth: default_max_depth(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_chunk_size() -> usize {
    16 * 1024 // 16 KB
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Final resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub chunk_size: usize,
    pub max_depth: usize,
    pub log_level: String,
}

impl Config {
    /// Load configuration from CLI args and optional TOML file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_cli(CliArgs::parse())
    }

    /// Resolve parsed CLI args, reading the TOML file they point at.
    pub fn from_cli(cli: CliArgs) -> Result<Self, ConfigError> {
        let toml_config = if let Some(ref config_path) = cli.config {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| ConfigError::FileRead(config_path.clone(), e))?;
            toml::from_str(&contents)
                .map_err(|e| ConfigError::TomlParse(config_path.clone(), e))?
        } else {
            TomlConfig::default()
        };

        Ok(Self::merge(cli, toml_config))
    }

    /// Merge CLI args with TOML config (CLI takes precedence)
    pub fn merge(cli: CliArgs, toml_config: TomlConfig) -> Self {
        Config {
            mode: cli.mode,
            // a zero-sized read would look like EOF
            chunk_size: cli
                .chunk_size
                .unwrap_or(toml_config.decoder.chunk_size)
                .max(1),
            max_depth: cli.max_depth.unwrap_or(toml_config.decoder.max_depth),
            log_level: cli.log_level.unwrap_or(toml_config.logging.level),
        }
    }

    /// Parser settings derived from this configuration
    pub fn parser(&self) -> ParserConfig {
        ParserConfig {
            max_depth: self.max_depth,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    FileRead(PathBuf, #[source] std::io::Error),
    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    TomlParse(PathBuf, #[source] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TomlConfig::default();
        assert_eq!(config.decoder.chunk_size, 16 * 1024);
        assert_eq!(config.decoder.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [decoder]
            chunk_size = 512
            max_depth = 8

            [logging]
            level = "debug"
        "#;

        let config: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.decoder.chunk_size, 512);
        assert_eq!(config.decoder.max_depth, 8);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("[decoder]\nmax_depth = 4\n").unwrap();
        assert_eq!(config.decoder.chunk_size, 16 * 1024);
        assert_eq!(config.decoder.max_depth, 4);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_cli_overrides_toml() {
        let cli = CliArgs::try_parse_from([
            "resp-codec",
            "decode",
            "--chunk-size",
            "3",
            "--log-level",
            "trace",
        ])
        .unwrap();
        let toml_config: TomlConfig =
            toml::from_str("[decoder]\nchunk_size = 512\nmax_depth = 4\n").unwrap();

        let config = Config::merge(cli, toml_config);
        assert_eq!(config.mode, Mode::Decode);
        assert_eq!(config.chunk_size, 3);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.parser().max_depth, 4);
    }

    #[test]
    fn test_explicit_cli_log_level_wins() {
        let toml_config: TomlConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        let cli =
            CliArgs::try_parse_from(["resp-codec", "decode", "--log-level", "info"]).unwrap();
        assert_eq!(Config::merge(cli, toml_config).log_level, "info");

        let toml_config: TomlConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        let cli = CliArgs::try_parse_from(["resp-codec", "decode"]).unwrap();
        assert_eq!(Config::merge(cli, toml_config).log_level, "debug");

        let cli = CliArgs::try_parse_from(["resp-codec", "decode"]).unwrap();
        assert_eq!(Config::merge(cli, TomlConfig::default()).log_level, "info");
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let cli = CliArgs::try_parse_from(["resp-codec", "decode", "-b", "0"]).unwrap();
        let config = Config::merge(cli, TomlConfig::default());
        assert_eq!(config.chunk_size, 1);
    }

    #[test]
    fn test_mode_is_required() {
        assert!(CliArgs::try_parse_from(["resp-codec"]).is_err());
        assert!(CliArgs::try_parse_from(["resp-codec", "bogus"]).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs::try_parse_from([
            "resp-codec",
            "encode",
            "--config",
            "/nonexistent/resp-codec.toml",
        ])
        .unwrap();
        match Config::from_cli(cli) {
            Err(ConfigError::FileRead(path, _)) => {
                assert_eq!(path, PathBuf::from("/nonexistent/resp-codec.toml"))
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
