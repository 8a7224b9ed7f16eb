//! 服务层 trait 定义
//!
//! 定义服务层的抽象接口，遵循六边形架构的端口适配器模式

use crate::models::caller::Caller;
use crate::models::err::AppResult;
use crate::models::projects::{ProjectCreate, ProjectSummary, ProjectUpdate};

/// 一页项目概要
#[derive(Debug, Clone)]
pub struct ProjectSummaryPage {
    pub projects: Vec<ProjectSummary>,
    pub total: u32,
}

/// 项目服务 trait 定义
///
/// 定义了项目相关的业务逻辑接口，作为应用层的端口(Port)。
/// 所有方法返回的 [`ProjectSummary`] 都带有调用者在该项目上的权限。
///
/// 该 trait 作为业务逻辑的抽象接口，具体实现由 [`ProjectService`](super::ProjectService) 提供
#[async_trait::async_trait]
pub trait ProjectServiceTrait: Send + Sync + 'static {
    /// 根据查询参数搜索调用者可见的项目
    ///
    /// # 参数
    /// - `name`: 项目名称（模糊搜索）
    /// - `org_id`: 所属组织
    /// - `page_size`: 页面大小
    /// - `offset`: 偏移量
    async fn find_projects(
        &self,
        caller: Caller,
        name: Option<String>,
        org_id: Option<i64>,
        page_size: i64,
        offset: i64,
    ) -> AppResult<ProjectSummaryPage>;

    /// 创建新项目，调用者成为项目创建者
    async fn create_project(&self, caller: Caller, project: ProjectCreate) -> AppResult<ProjectSummary>;

    /// 根据 ID 获取项目信息
    async fn get_project(&self, caller: Caller, id: i64) -> AppResult<ProjectSummary>;

    /// 更新项目信息，仅项目管理员可操作
    async fn update_project(&self, caller: Caller, id: i64, update: ProjectUpdate) -> AppResult<ProjectSummary>;

    /// 删除项目，仅项目管理员可操作
    ///
    /// # 返回值
    /// 返回被删除的项目信息
    async fn delete_project(&self, caller: Caller, id: i64) -> AppResult<ProjectSummary>;
}
