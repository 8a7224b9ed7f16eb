//! 项目权限
//!
//! 描述调用者在某个项目上的各项权限，作为 [`ProjectSummary`](super::projects::ProjectSummary)
//! 的内嵌对象返回给前端。

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// 非法的权限等级数值
#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid permission level: {0}")]
pub struct InvalidPermissionLevel(pub i16);

/// 权限等级
///
/// 序列化为数字，等级越高权限越大：
///
/// | 等级 | 数值 |
/// |---|---|
/// | Hidden | 0 |
/// | Read | 1 |
/// | Write | 2 |
/// | Delete | 3 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum PermissionLevel {
    Hidden,
    Read,
    Write,
    Delete,
}

impl From<PermissionLevel> for i16 {
    fn from(level: PermissionLevel) -> Self {
        match level {
            PermissionLevel::Hidden => 0,
            PermissionLevel::Read => 1,
            PermissionLevel::Write => 2,
            PermissionLevel::Delete => 3,
        }
    }
}

impl TryFrom<i16> for PermissionLevel {
    type Error = InvalidPermissionLevel;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PermissionLevel::Hidden),
            1 => Ok(PermissionLevel::Read),
            2 => Ok(PermissionLevel::Write),
            3 => Ok(PermissionLevel::Delete),
            other => Err(InvalidPermissionLevel(other)),
        }
    }
}

/// 调用者在项目上的权限
///
/// 缺省值只允许查看可视化（`vizPermission = 1`），其他权限全部关闭。
/// 反序列化时缺失的字段同样取缺省值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPermission {
    #[schema(value_type = i16, example = 0)]
    /// 数据源权限
    pub source_permission: PermissionLevel,

    #[schema(value_type = i16, example = 0)]
    /// 数据视图权限
    pub view_permission: PermissionLevel,

    #[schema(value_type = i16, example = 0)]
    /// 组件权限
    pub widget_permission: PermissionLevel,

    #[schema(value_type = i16, example = 1)]
    /// 可视化（仪表盘/大屏）权限
    pub viz_permission: PermissionLevel,

    #[schema(value_type = i16, example = 0)]
    /// 定时任务权限
    pub schedule_permission: PermissionLevel,

    /// 是否允许分享
    pub share_permission: bool,

    /// 是否允许下载
    pub download_permission: bool,

    /// 是否为项目管理员
    pub is_project_admin: bool,
}

impl Default for ProjectPermission {
    fn default() -> Self {
        Self {
            viz_permission: PermissionLevel::Read,
            ..Self::uniform(PermissionLevel::Hidden)
        }
    }
}

impl ProjectPermission {
    /// 所有模块使用同一个权限等级，分享/下载/管理员标记全部关闭
    pub fn uniform(level: PermissionLevel) -> Self {
        Self {
            source_permission: level,
            view_permission: level,
            widget_permission: level,
            viz_permission: level,
            schedule_permission: level,
            share_permission: false,
            download_permission: false,
            is_project_admin: false,
        }
    }

    /// 项目管理员权限
    pub fn admin() -> Self {
        Self {
            share_permission: true,
            download_permission: true,
            is_project_admin: true,
            ..Self::uniform(PermissionLevel::Delete)
        }
    }

    /// 预览权限：只能查看可视化
    pub fn preview() -> Self {
        Self {
            viz_permission: PermissionLevel::Read,
            ..Self::uniform(PermissionLevel::Hidden)
        }
    }
}
