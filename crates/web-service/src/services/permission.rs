//! 项目权限计算
//!
//! 根据调用者与项目的关系计算 [`ProjectPermission`]：
//!
//! - 项目创建者拥有管理员权限
//! - 其他人只能预览公开项目
//! - 非公开项目对其他人不可见

use crate::models::caller::Caller;
use crate::models::permission::ProjectPermission;
use database::ProjectRecord;
use shared_lib::UnknownVisibility;

/// 计算调用者在项目上的权限，返回 `None` 表示无权访问
pub fn evaluate_permission(caller: Caller, record: &ProjectRecord, policy: UnknownVisibility) -> Option<ProjectPermission> {
    if caller.user_id == Some(record.user_id) {
        return Some(ProjectPermission::admin());
    }

    policy
        .is_public(record.visibility)
        .then(ProjectPermission::preview)
}
