use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chirpy", about = "A tiny microblogging server")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Path to the database file
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Wipe the database on startup
    #[arg(long)]
    pub reset: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as the static site under /app.
    pub static_dir: PathBuf,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens. Overridable via
    /// CHIRPY_JWT_SECRET; a random one is generated when unset.
    pub jwt_secret: Option<String>,
    /// Shared key the payment-provider webhook must present.
    /// Overridable via CHIRPY_POLKA_KEY.
    pub polka_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref database) = cli.database {
            config.database.path = Some(database.clone());
        }

        // Environment overrides
        if let Ok(secret) = std::env::var("CHIRPY_JWT_SECRET") {
            config.auth.jwt_secret = Some(secret);
        }
        if let Ok(key) = std::env::var("CHIRPY_POLKA_KEY") {
            config.auth.polka_key = Some(key);
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("chirpy")
        })
    }

    pub fn db_path(&self, data_dir: &std::path::Path) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| data_dir.join("database.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            config: None,
            host: None,
            port: None,
            data_dir: None,
            database: None,
            reset: false,
        }
    }

    #[test]
    fn defaults_bind_port_8080() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn cli_overrides_file_defaults() {
        let mut cli = bare_cli();
        cli.config = Some(PathBuf::from("/nonexistent/config.toml"));
        cli.port = Some(9999);
        cli.database = Some(PathBuf::from("/tmp/other.json"));
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(
            config.database.path.as_deref(),
            Some(std::path::Path::new("/tmp/other.json"))
        );
    }

    #[test]
    fn db_path_defaults_into_data_dir() {
        let config = Config::default();
        let path = config.db_path(std::path::Path::new("/data"));
        assert_eq!(path, PathBuf::from("/data/database.json"));
    }

    #[test]
    fn config_file_parses() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 3001

            [auth]
            jwt_secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.auth.jwt_secret.as_deref(), Some("s3cret"));
    }
}
