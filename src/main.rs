use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chatroom::chat::{ChatController, ChatMailbox};
use chatroom::config::ServerConfig;
use chatroom::shared::AppState;
use chatroom::websockets::{websocket_handler, Broadcaster, InMemoryBroadcaster};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatroom=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting chat server");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return;
        }
    };

    // The broadcaster is shared; the controller (and through it the roster)
    // is moved into the mailbox task and only ever driven from there.
    let broadcaster: Arc<dyn Broadcaster> = Arc::new(InMemoryBroadcaster::new());
    let controller = ChatController::new(broadcaster.clone());
    let mailbox = ChatMailbox::spawn(controller);
    let app_state = AppState::new(broadcaster, mailbox);

    // WebSocket endpoint plus the static chat client
    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap();
    info!(port = config.port, "Server listening");
    axum::serve(listener, app).await.unwrap();
}
