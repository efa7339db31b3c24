use crate::channel::{METHODS, MethodCall, WifiChannel};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

// The shared state for our web server.
// 通道由守护进程持有，这里只保留一个 Arc 引用。
pub type WebServerState = State<Arc<AppState>>;

pub struct AppState {
    pub channel: Arc<WifiChannel>,
}

/// Builds the router that hosts the method channel.
pub fn router(channel: Arc<WifiChannel>) -> Router {
    let app_state = Arc::new(AppState { channel });

    Router::new()
        .route("/api/channel", get(api_describe_channel))
        .route("/channels/{name}", post(api_invoke_channel))
        .with_state(app_state)
}

/// Serves the channel on `bind_addr` until `shutdown` resolves.
///
/// # Arguments
/// * `channel` - The channel to host; the caller keeps its own `Arc`.
/// * `bind_addr` - Address to listen on.
/// * `shutdown` - Future that completes when the server should stop.
pub async fn run_server<F>(
    channel: Arc<WifiChannel>,
    bind_addr: SocketAddr,
    shutdown: F,
) -> crate::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(channel);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("🌐 Web server listening on {}", bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

// --- Route Handlers ---

/// 返回通道名称和支持的方法
async fn api_describe_channel(State(state): WebServerState) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "name": state.channel.name(),
            "methods": METHODS,
        })),
    )
}

/// 调用通道上的方法；未知方法同样返回 200 和 not_implemented
async fn api_invoke_channel(
    State(state): WebServerState,
    Path(name): Path<String>,
    Json(call): Json<MethodCall>,
) -> impl IntoResponse {
    if name != state.channel.name() {
        tracing::warn!(channel = %name, "Call on unknown channel");
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("unknown channel: {}", name) })),
        )
            .into_response();
    }

    let response = state.channel.handle(call).await;
    (StatusCode::OK, Json(response)).into_response()
}
