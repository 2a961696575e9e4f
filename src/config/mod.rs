pub mod toml_config;

pub use toml_config::{CorsConfig, LoggingConfig, ServerConfig, TomlConfig};

use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "matrix-math-engine")]
#[command(about = "HTTP backend for factoring, equation solving and trigonometry")]
pub struct CliArgs {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override server.host")]
    pub host: Option<String>,

    #[arg(long, help = "Override server.port")]
    pub port: Option<u16>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliArgs {
    /// Loads the TOML file (or defaults) and applies command line overrides.
    pub fn load_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.json_logs {
            config.logging.json = true;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nhost = \"0.0.0.0\"\nport = 9000\n")
            .unwrap();
        let path = temp_file.path().to_string_lossy().to_string();

        let args = CliArgs::parse_from([
            "matrix-math-engine",
            "--config",
            path.as_str(),
            "--port",
            "9100",
            "--json-logs",
        ]);
        let config = args.load_config().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert!(config.logging.json);
    }

    #[test]
    fn test_defaults_without_file() {
        let args = CliArgs::parse_from(["matrix-math-engine"]);
        let config = args.load_config().unwrap();
        assert_eq!(config, TomlConfig::default());
        assert!(!args.verbose);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let args = CliArgs::parse_from(["matrix-math-engine", "--config", "/nonexistent/app.toml"]);
        assert!(matches!(
            args.load_config(),
            Err(crate::utils::error::MathError::IoError(_))
        ));
    }
}
