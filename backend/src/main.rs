//! Backend entry-point: configuration, tracing, migrations, and server start.

use std::net::SocketAddr;

use actix_web::web;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use happywall::inbound::http::health::HealthState;
use happywall::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use happywall::server::{ServerConfig, create_server};

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
#[command(name = "happywall", about = "Social wall backend")]
struct Cli {
    /// PostgreSQL connection string. Without one the server runs on
    /// in-memory stores and loses all data on restart.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let bind_addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let mut config = ServerConfig::new(bind_addr);

    match &cli.database_url {
        Some(database_url) => {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
            info!(%bind_addr, "starting with PostgreSQL persistence");
        }
        None => {
            warn!(%bind_addr, "DATABASE_URL not set; starting with in-memory stores");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
