use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use weather_core::Config;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "CWA weather forecast proxy")]
pub struct Cli {
    /// Port to listen on; overrides `PORT`.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Path to a TOML config file; defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Environment name; overrides `APP_ENV` / `NODE_ENV`.
    #[arg(long = "env")]
    pub environment: Option<String>,
}

impl Cli {
    /// Resolve the effective configuration: file, then environment, then flags.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path, |key| std::env::var(key).ok())
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::load()?,
        };

        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(env) = &self.environment {
            config.environment = env.clone();
        }

        Ok(config)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;

        if !config.has_api_key() {
            tracing::warn!("CWA_API_KEY is not set; weather endpoints will answer with 500");
        }

        weather_server::run_http_server(config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let dir = std::env::temp_dir().join("weather-server-cli-test-missing.toml");
        let cli = Cli::parse_from([
            "weather-server",
            "--port",
            "8081",
            "--env",
            "production",
            "--config",
            dir.to_str().unwrap(),
        ]);

        let config = cli.load_config().unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.environment, "production");
    }
}
