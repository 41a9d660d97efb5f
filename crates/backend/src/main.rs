pub mod dashboards;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, Method};
use axum::middleware;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use shared::config::{self, Config};
use shared::context::AppContext;
use shared::data::db;
use shared::data::source::SqlDataSource;
use system::auth::password;
use system::auth::verifier::ConfiguredUsers;
use system::middleware::request_logger::request_logger;

#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(version)]
#[command(about = "Commission and invoice dashboard server")]
struct Cli {
    /// Configuration file (defaults to config.toml next to the executable)
    #[arg(short, long, env = "DASHBOARD_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Print an argon2 hash for a `[[auth.users]]` entry
    HashPassword { password: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::HashPassword { password } => {
            println!("{}", password::hash_password(&password)?);
            Ok(())
        }
        Command::Serve => {
            system::tracing::initialize()?;
            let config = config::load_config(cli.config.as_deref())?;
            serve(config).await
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let db_path = config::get_database_path(&config);
    let conn = db::connect(&db_path)
        .await
        .with_context(|| format!("db init failed for {}", db_path.display()))?;

    let verifier = ConfiguredUsers::from_config(&config.auth);
    if verifier.is_empty() {
        tracing::warn!("No users configured under [[auth.users]]; every login will be rejected");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid server address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let ctx = AppContext::load(config, Arc::new(SqlDataSource::new(conn)), Arc::new(verifier)).await;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = routes::configure_routes(ctx)
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!("Port {} is already in use", addr.port());
            } else {
                tracing::error!("Failed to bind to {}: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["dashboard", "--config", "/etc/dashboard.toml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("/etc/dashboard.toml")));

        let cli = Cli::try_parse_from(["dashboard", "hash-password", "s3cret"]).unwrap();
        assert!(matches!(cli.command, Some(Command::HashPassword { password }) if password == "s3cret"));
    }
}
