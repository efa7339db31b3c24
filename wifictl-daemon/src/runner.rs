use anyhow::Context;
use std::sync::Arc;
use wifictl_core::{
    channel::WifiChannel, config::load_config, factory::create_runner, web_server,
    wifi::WifiControl,
};

/// 组合根：构建后端、适配器和通道，并在整个进程生命周期内持有通道
pub async fn run() -> anyhow::Result<()> {
    let config = load_config().context("Failed to load configuration")?;

    let runner = create_runner(&config.wifi);
    let channel = Arc::new(WifiChannel::new(WifiControl::new(runner)));
    tracing::info!(channel = channel.name(), "📡 Method channel registered");

    web_server::run_server(channel.clone(), config.server.bind_addr, shutdown_signal())
        .await
        .context("Web server failed")?;

    tracing::info!(channel = channel.name(), "🛑 Shutting down, releasing channel");
    drop(channel);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        // 无法监听信号时一直运行
        std::future::pending::<()>().await;
    }
}
