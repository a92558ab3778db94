use std::net::SocketAddr;

use clap::Parser;
use rand::Rng;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use chirpy::config::{Cli, Config};
use chirpy::db::Db;
use chirpy::routes;
use chirpy::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;

    // Initialize the store
    let db_path = config.db_path(&data_dir);
    let db = Db::open(&db_path, cli.reset)?;
    if cli.reset {
        tracing::warn!("Database reset: {}", db_path.display());
    }
    tracing::info!("Database at {}", db_path.display());

    let jwt_secret = match config.auth.jwt_secret.clone() {
        Some(secret) => secret,
        None => {
            tracing::warn!("No JWT secret configured; sessions will not survive a restart");
            hex::encode(rand::thread_rng().gen::<[u8; 32]>())
        }
    };

    let state = AppState::new(db, config.clone(), jwt_secret);

    let app = routes::app(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
