use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 用户基础信息
///
/// 只包含前端展示所需的最少字段，是查询时刻的快照。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBaseInfo {
    #[schema(example = 3)]
    /// 用户ID
    pub id: i64,

    #[schema(example = "alice")]
    /// 用户名
    pub username: String,

    #[schema(example = "alice@example.com")]
    pub email: Option<String>,

    /// 头像地址
    pub avatar: Option<String>,
}
