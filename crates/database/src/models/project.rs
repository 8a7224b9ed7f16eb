//! 项目数据库模型
//!
//! 定义项目相关的数据库模型结构体

use shared_lib::UnknownVisibility;

/// 项目记录
///
/// 对应 `bi.projects` 的一行，并左连接了创建者 `bi.users` 的基础信息，
/// 因此创建者相关的字段都可能为空（用户已被删除）。
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub pic: Option<String>,
    pub org_id: i64,
    /// 三态：`None` 表示尚未确定
    pub visibility: Option<bool>,
    pub user_id: i64,
    pub creator_username: Option<String>,
    pub creator_email: Option<String>,
    pub creator_avatar: Option<String>,
}

/// 项目搜索条件
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// 项目名称（模糊搜索）
    pub name: Option<String>,

    /// 只查询指定组织下的项目
    pub org_id: Option<i64>,

    /// 调用者ID，调用者自己创建的项目总是可见
    pub caller: Option<i64>,

    /// 可见性未知的项目如何处理
    pub unknown_visibility: UnknownVisibility,
}

/// 项目搜索结果
#[derive(Debug, Clone)]
pub struct ProjectSearchResult {
    pub projects: Vec<ProjectRecord>,
    pub total: u32,
}

/// 项目创建参数
#[derive(Debug, Clone)]
pub struct ProjectCreate {
    pub name: String,
    pub description: Option<String>,
    pub pic: Option<String>,
    pub org_id: i64,
    pub visibility: Option<bool>,
    /// 创建者ID
    pub user_id: i64,
}

/// 项目更新参数
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub pic: Option<String>,
    pub visibility: Option<bool>,
}
