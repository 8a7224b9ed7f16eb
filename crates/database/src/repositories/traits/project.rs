//! 项目仓库 trait 定义
//!
//! 定义项目数据库操作的抽象接口

use crate::models::project::{ProjectCreate, ProjectFilter, ProjectRecord, ProjectSearchResult, ProjectUpdate};
use crate::DatabaseResult;

/// 项目仓库trait定义
///
/// 定义了项目相关的数据库操作接口，支持：
/// - 项目搜索（分页）
/// - 项目创建
/// - 项目查询
/// - 项目更新
/// - 项目删除
/// - 组织存在性检查
///
/// 所有查询到的 [`ProjectRecord`] 都带有创建者的基础信息。
#[async_trait::async_trait]
pub trait ProjectRepositoryTrait: Send + Sync + 'static {
    /// 根据查询参数搜索项目
    ///
    /// # 参数
    /// - `filter`: 搜索条件，只会返回调用者可见的项目
    /// - `page_size`: 页面大小
    /// - `offset`: 偏移量
    ///
    /// # 返回值
    /// 返回包含项目列表和总数的结果 [`ProjectSearchResult`]
    async fn find_projects(&self, filter: ProjectFilter, page_size: i64, offset: i64) -> DatabaseResult<ProjectSearchResult>;

    /// 创建新项目
    ///
    /// # 返回值
    /// 返回创建的项目信息
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectRecord>;

    /// 根据 ID 获取项目信息
    ///
    /// 项目不存在时返回 [`DatabaseError::NotFound`](crate::DatabaseError::NotFound)
    async fn get_project_by_id(&self, id: i64) -> DatabaseResult<ProjectRecord>;

    /// 更新项目信息
    ///
    /// # 参数
    /// - `id`: 项目 ID
    /// - `update`: 更新信息，为 `None` 的字段保持原值
    async fn update_project(&self, id: i64, update: ProjectUpdate) -> DatabaseResult<ProjectRecord>;

    /// 删除项目
    ///
    /// # 返回值
    /// 返回被删除的项目信息
    async fn delete_project(&self, id: i64) -> DatabaseResult<ProjectRecord>;

    /// 组织是否存在
    async fn organization_exists(&self, org_id: i64) -> DatabaseResult<bool>;
}
