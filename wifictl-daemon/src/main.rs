mod runner;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 初始化日志（这是入口点的职责），未设置 RUST_LOG 时默认 info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 2. 调用库的核心逻辑
    if let Err(e) = runner::run().await {
        // 3. 处理顶层错误
        tracing::error!("❌ wifictld failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
