//! Cookoff server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cookoff_core::Roster;
use cookoff_server::storage::RatingsDatabase;
use cookoff_server::{AppState, build_router, shutdown_signal};

const DEFAULT_SECRET: &str = "dev-secret-change-me";
const DEFAULT_ADMIN_PASSWORD: &str = "MASTERCHEF2025";

#[derive(Parser, Debug)]
#[command(name = "cookoff-server")]
#[command(version, about = "Cooking-competition rating server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    addr: SocketAddr,

    /// Path to the SQLite ratings database.
    #[arg(long, env = "DATABASE_PATH", default_value = "ratings.db")]
    database: PathBuf,

    /// Session signing secret. The default is insecure and must be
    /// overridden in any real deployment.
    #[arg(long, env = "SECRET_KEY", default_value = DEFAULT_SECRET)]
    secret_key: String,

    /// Shared admin password. The default is insecure and must be
    /// overridden in any real deployment.
    #[arg(long, env = "ADMIN_PASSWORD", default_value = DEFAULT_ADMIN_PASSWORD)]
    admin_password: String,

    /// Comma-separated entrant roster. Defaults to the built-in list.
    /// Fixed for the lifetime of the process.
    #[arg(long, env = "ENTRANTS")]
    entrants: Option<String>,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "cookoff_server=info,cookoff_core=info".into()),
    );
    if args.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    if args.secret_key == DEFAULT_SECRET {
        warn!("Using the default session secret; set SECRET_KEY before deploying");
    }
    if args.admin_password == DEFAULT_ADMIN_PASSWORD {
        warn!("Using the default admin password; set ADMIN_PASSWORD before deploying");
    }

    let roster = args.entrants.as_deref().map_or_else(Roster::default, Roster::parse);
    anyhow::ensure!(!roster.is_empty(), "Entrant roster must not be empty");

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %args.addr,
        entrants = roster.len(),
        "Starting cookoff-server"
    );

    let db = RatingsDatabase::open(&args.database).await?;

    let state = AppState::new(db, roster, &args.admin_password);
    let app = build_router(state, &args.secret_key);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
