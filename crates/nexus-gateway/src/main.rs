mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result as AnyResult;
use nexus_core::ClientStore;
use nexus_desk::ClientDesk;
use nexus_platform::{PgClientStore, ServiceConfig, StoreBackend, connect_database};
use nexus_store::InMemoryClientStore;
use tracing::{info, warn};

use crate::routes::{AppState, build_router};

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "nexus_gateway=info,nexus_desk=info".to_string()),
        )
        .init();

    let config = ServiceConfig::from_env("0.0.0.0:8200")?;

    let store: Arc<dyn ClientStore> = match config.store_backend {
        StoreBackend::Postgres { database_url } => {
            let pool = connect_database(&database_url).await?;
            Arc::new(PgClientStore::new(pool))
        }
        StoreBackend::Memory => {
            warn!("using in-memory client store; data is lost on restart");
            Arc::new(InMemoryClientStore::new())
        }
    };

    let state = AppState {
        desk: Arc::new(ClientDesk::new(store)),
    };
    let router = build_router(state);

    let addr: SocketAddr = config.http_addr.parse()?;
    info!("client desk listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
