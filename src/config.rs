use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Recipe CRUD API")]
pub struct Args {
    /// Host to bind to (overrides RECIPE_API_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides RECIPE_API_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides RECIPE_API_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Apply migrations, create the default user, and exit
    #[arg(long)]
    pub migrate: bool,
}

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://recipes.db";

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        let migrate = args.migrate;
        let cfg = Self::merge(args, |key| env::var(key))?;
        Ok((cfg, migrate))
    }

    /// CLI values win over environment values, which win over defaults.
    fn merge(
        args: Args,
        lookup: impl Fn(&str) -> Result<String, env::VarError>,
    ) -> Result<Self> {
        let env_host = lookup("RECIPE_API_HOST").unwrap_or_else(|_| DEFAULT_HOST.into());
        let env_port = match lookup("RECIPE_API_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing RECIPE_API_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => DEFAULT_PORT,
            Err(err) => return Err(err).context("reading RECIPE_API_PORT"),
        };
        let env_db =
            lookup("RECIPE_API_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());

        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
