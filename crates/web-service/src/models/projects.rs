use crate::models::common::PageQuery;
use crate::models::permission::ProjectPermission;
use crate::models::users::UserBaseInfo;
use database::ProjectRecord;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 搜索项目列表信息
///
/// - `project_name`为可选参数
/// - `org_id`为可选参数，指定后只搜索该组织下的项目
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectSearch {
    #[schema(example = "foo")]
    #[validate(length(min = 1, max = 100))]
    /// 查询的项目名称（模糊搜索）
    pub project_name: Option<String>,

    #[schema(example = 7)]
    /// 所属组织ID
    pub org_id: Option<i64>,

    /// 查询分页信息
    #[validate(nested)]
    pub page_query: PageQuery,
}

/// 新建项目参数
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectCreate {
    #[schema(example = "Sales Dashboard")]
    #[validate(length(min = 1, max = 100))]
    /// 新建项目名称
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(max = 1024))]
    /// 项目封面图片
    pub pic: Option<String>,

    #[schema(example = 7)]
    /// 所属组织ID
    pub org_id: i64,

    /// 是否公开，不传表示暂不确定
    pub visibility: Option<bool>,
}

/// 修改项目参数，不传的字段保持原值
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(max = 1024))]
    pub pic: Option<String>,

    pub visibility: Option<bool>,
}

/// 项目概要信息
///
/// 项目接口对外返回的数据格式。除 `permission` 外所有字段都可以为空，
/// 为空的字段序列化为 `null`；反序列化时缺失的字段与 `null` 等价，
/// 缺失的 `permission` 取 [`ProjectPermission::default`]。
///
/// ```json
/// {
///   "id": 42,
///   "name": "Sales Dashboard",
///   "description": null,
///   "pic": null,
///   "orgId": 7,
///   "visibility": true,
///   "permission": { "vizPermission": 1, ... },
///   "createBy": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    #[schema(example = 42)]
    /// 项目ID，持久化之前为空
    pub id: Option<i64>,

    #[schema(example = "Sales Dashboard")]
    pub name: Option<String>,

    pub description: Option<String>,

    /// 项目封面图片（URL或路径）
    pub pic: Option<String>,

    #[schema(example = 7)]
    /// 所属组织ID
    pub org_id: Option<i64>,

    /// 是否公开；为空表示尚未确定
    pub visibility: Option<bool>,

    /// 调用者在该项目上的权限
    #[serde(default, deserialize_with = "permission_or_default")]
    pub permission: ProjectPermission,

    /// 项目创建者
    pub create_by: Option<UserBaseInfo>,
}

/// `permission` 为 `null` 时与缺失等价，取缺省权限
fn permission_or_default<'de, D>(deserializer: D) -> Result<ProjectPermission, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ProjectPermission>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for ProjectSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectSummary {
    /// 创建一个空的项目概要，只有 `permission` 被设置为缺省权限
    pub fn new() -> Self {
        Self {
            id: None,
            name: None,
            description: None,
            pic: None,
            org_id: None,
            visibility: None,
            permission: ProjectPermission::default(),
            create_by: None,
        }
    }

    /// 根据数据库记录和调用者权限组装项目概要
    ///
    /// 创建者用户已不存在时 `create_by` 为空。
    pub fn from_record(record: ProjectRecord, permission: ProjectPermission) -> Self {
        let create_by = record.creator_username.map(|username| UserBaseInfo {
            id: record.user_id,
            username,
            email: record.creator_email,
            avatar: record.creator_avatar,
        });

        Self {
            id: Some(record.id),
            name: Some(record.name),
            description: record.description,
            pic: record.pic,
            org_id: Some(record.org_id),
            visibility: record.visibility,
            permission,
            create_by,
        }
    }
}
