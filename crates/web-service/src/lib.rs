//! Web服务模块
//!
//! 提供 HTTP API 接口和文档服务

use color_eyre::Result;
use database::{DatabasePool, ProjectRepository};
use services::{ProjectService, ProjectServiceTrait};
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::info;

pub mod models;
pub mod routes;
pub mod services;

/// 应用共享状态
///
/// 服务以 trait object 的形式保存，测试时可以替换为其他实现。
#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
}

impl AppState {
    pub fn new(project_service: Arc<dyn ProjectServiceTrait>) -> Self {
        Self { project_service }
    }

    /// 基于数据库连接池和程序配置创建共享状态
    pub fn from_pool(pool: DatabasePool, config: &AppConfig) -> Self {
        let repository = Arc::new(ProjectRepository::new(pool));
        Self::new(Arc::new(ProjectService::new(repository, config.unknown_visibility)))
    }
}

/// 启动 Web 服务
pub async fn start_web_service(pool: DatabasePool, config: Arc<AppConfig>, mut shutdown_rx: Receiver<bool>) -> Result<()> {
    let shared_state = AppState::from_pool(pool, &config);

    let router = routes::create_app_router(shared_state);

    info!("🚀 启动 Web Service 在 {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            // 发送端被丢弃同样视为关闭信号
            let _ = shutdown_rx.changed().await;
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
