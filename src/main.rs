use color_eyre::Result;
use shared_lib::AppConfig;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load()?;

    tracing_subscriber::fmt().with_max_level(config.log_level).init();

    let pool = database::initialize_database(config.clone()).await?;

    // 关闭信号，收到Ctrl-C后通知所有服务退出
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("❌ 监听关闭信号失败: {e}");
            return;
        }
        info!("📴 收到关闭信号");
        let _ = shutdown_tx.send(true);
    });

    web_service::start_web_service(pool, config, shutdown_rx).await?;

    info!("👋 服务已退出");

    Ok(())
}
