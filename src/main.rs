use std::{env, path::PathBuf, process, sync::Arc};

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use order_tracker_backend::{AppState, app, services::order_store::MongoOrderStore};

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,order_tracker_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // A reachable store is a hard startup dependency: no connection, no server.
    let Ok(mongo_uri) = env::var("MONGO_URI") else {
        tracing::error!("MONGO_URI is not set in the environment");
        process::exit(1);
    };

    tracing::info!("Connecting to MongoDB...");
    let store = match MongoOrderStore::connect(&mongo_uri).await {
        Ok(store) => store,
        Err(err) => {
            tracing::error!("Failed to connect to MongoDB: {err}");
            process::exit(1);
        }
    };
    tracing::info!("MongoDB connected");

    let front_dir = env::var("FRONT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("front"));

    let state = AppState {
        store: Arc::new(store),
    };
    let app = app(state, &front_dir);

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("Failed to bind listener");

    tracing::info!(
        "Server running on port {}",
        listener.local_addr().expect("listener address").port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
