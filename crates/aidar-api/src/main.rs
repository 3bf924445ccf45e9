use std::net::SocketAddr;

use aidar_api::config::{ApiConfig, StoreBackend};
use aidar_api::AppState;
use aidar_storage::s3::S3Backend;
use aidar_storage::{MemoryStore, S3Store, Store};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env()?;
    let address = config.address();
    let listener = TcpListener::bind(address).await?;
    tracing::info!(
        %address,
        store = %config.store,
        policy = ?config.policy,
        "aidar api listening"
    );

    match config.store {
        StoreBackend::Memory => {
            let state = AppState::new(MemoryStore::in_memory(), config.policy);
            serve(listener, address, state).await
        }
        StoreBackend::S3 => {
            let client = aidar_storage::client::build_client().await;
            let store = S3Store::new(S3Backend::new(client, config.bucket));
            serve(listener, address, AppState::new(store, config.policy)).await
        }
    }
}

async fn serve<S: Store + 'static>(
    listener: TcpListener,
    address: SocketAddr,
    state: AppState<S>,
) -> eyre::Result<()> {
    axum::serve(listener, aidar_api::router(state))
        .await
        .map_err(|e| eyre::eyre!("server on {address} failed: {e}"))
}
