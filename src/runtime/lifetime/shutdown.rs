use tokio::signal;
use tracing::{error, warn};

/// 等待 Ctrl+C 信号；无法监听时一直挂起，由服务器自身退出
pub async fn listen_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, initiating graceful shutdown...");
}
