//! HTTP server command for the Ecoleta API

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use ecoleta_server::db::{create_pool_with_options, migrations};
use ecoleta_server::http::server::DEFAULT_MAX_UPLOAD_BYTES;
use ecoleta_server::http::{run_server, ServerConfig};
use ecoleta_server::models::PublicUrl;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "ECOLETA_BIND", default_value = "0.0.0.0:3333")]
    pub bind: SocketAddr,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum database connections
    #[arg(long, env = "ECOLETA_MAX_CONNECTIONS", default_value = "5")]
    pub max_connections: u32,

    /// Public base URL used in image_url fields, e.g. http://192.168.0.10:3333
    #[arg(long, env = "ECOLETA_PUBLIC_URL", default_value = "http://localhost:3333")]
    pub public_url: String,

    /// Directory uploaded images are stored in and served from
    #[arg(long, env = "ECOLETA_UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Maximum upload size in bytes
    #[arg(long, env = "ECOLETA_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Restrict CORS to these origins (comma-separated); all origins when unset
    #[arg(long, env = "ECOLETA_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, env = "ECOLETA_REQUEST_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Do not run migrations before starting
    #[arg(long)]
    pub skip_migrations: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_origins.is_empty(),
            allowed_origins: self.cors_origins.clone(),
            public_url: PublicUrl::new(&self.public_url),
            uploads_dir: self.uploads_dir.clone(),
            max_upload_bytes: self.max_upload_bytes,
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting ecoleta server on {}", args.bind);

    let pool = create_pool_with_options(&args.database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    if args.skip_migrations {
        tracing::info!("Skipping migrations");
    } else {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    // Run server (blocks until shutdown)
    run_server(pool, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn builds_config_from_flags() {
        let harness = Harness::try_parse_from([
            "ecoleta",
            "--database-url",
            "postgres://localhost/ecoleta",
            "--public-url",
            "http://10.0.0.2:3333/",
            "--cors-origins",
            "http://localhost:3000,http://localhost:19006",
        ])
        .unwrap();
        let config = harness.serve.server_config();

        assert_eq!(config.public_url.as_str(), "http://10.0.0.2:3333");
        assert!(!config.cors_permissive);
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn every_setting_has_env_fallback() {
        let command = Harness::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };

        assert_eq!(env_of("timeout").as_deref(), Some("ECOLETA_REQUEST_TIMEOUT"));
        assert_eq!(env_of("bind").as_deref(), Some("ECOLETA_BIND"));
        assert_eq!(env_of("public_url").as_deref(), Some("ECOLETA_PUBLIC_URL"));
    }
}
