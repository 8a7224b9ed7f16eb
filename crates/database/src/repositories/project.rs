//! 项目仓库
//!
//! 负责项目相关的数据库操作

use crate::models::project::{ProjectCreate, ProjectFilter, ProjectRecord, ProjectSearchResult, ProjectUpdate};
use crate::repositories::traits::ProjectRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use shared_lib::UnknownVisibility;
use sqlx::PgPool;
use tracing::debug;

/// 查询 [`ProjectRecord`] 时使用的字段列表
///
/// 约定项目表别名为 `p`，创建者用户表别名为 `u`。
const RECORD_COLUMNS: &str = r#"
    p.id,
    p.name,
    p.description,
    p.pic,
    p.org_id,
    p.visibility,
    p.user_id,
    u.username AS creator_username,
    u.email    AS creator_email,
    u.avatar   AS creator_avatar
"#;

/// 搜索项目时的过滤条件，列表查询和总数查询共用
///
/// `$1` 名称匹配模式，`$2` 组织ID，`$3` 调用者，`$4` 可见性未知时是否视为公开
const SEARCH_CONDITIONS: &str = r#"
    ($1::TEXT IS NULL OR p.name LIKE $1 ESCAPE '\')
    AND ($2::BIGINT IS NULL OR p.org_id = $2)
    AND (p.user_id = $3 OR COALESCE(p.visibility, $4))
"#;

/// 转义 `LIKE` 模式中的通配符，使用户输入按字面匹配
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 项目仓库结构体
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// 创建新的项目仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    /// 根据查询参数搜索项目
    ///
    /// # SQL 查询说明
    ///
    /// 1. 总数单独查询，请求的页超出范围时也能返回真实总数
    /// 2. 可选参数为 NULL 时不参与过滤，名称中的 `%`、`_` 按字面匹配
    /// 3. 只返回调用者创建的项目，以及公开项目；`visibility` 为 NULL 的项目按
    ///    [`UnknownVisibility`] 策略处理
    async fn find_projects(&self, filter: ProjectFilter, page_size: i64, offset: i64) -> DatabaseResult<ProjectSearchResult> {
        debug!(
            "🔍 搜索项目 - 条件: {:?}, 页面大小: {}, 偏移量: {}",
            filter, page_size, offset
        );

        let like_param = filter
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(|n| format!("%{}%", escape_like(n)));
        let unknown_is_public = filter.unknown_visibility == UnknownVisibility::Public;

        let count_sql = format!("SELECT COUNT(*) FROM bi.projects p WHERE {SEARCH_CONDITIONS}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(like_param.as_deref())
            .bind(filter.org_id)
            .bind(filter.caller)
            .bind(unknown_is_public)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM bi.projects p
                     LEFT JOIN bi.users u ON u.id = p.user_id
            WHERE {SEARCH_CONDITIONS}
            ORDER BY p.id
            LIMIT $5 OFFSET $6
            "#
        );

        let projects: Vec<ProjectRecord> = sqlx::query_as(&sql)
            .bind(like_param.as_deref())
            .bind(filter.org_id)
            .bind(filter.caller)
            .bind(unknown_is_public)
            .bind(page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = total as u32;
        debug!("✅ 搜索完成 - 找到 {} 个项目，总计 {} 个", projects.len(), total);

        Ok(ProjectSearchResult { projects, total })
    }

    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectRecord> {
        debug!("📝 创建项目: {:#?}", project);

        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO bi.projects (name, description, pic, org_id, visibility, user_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, now(), now())
                RETURNING *
            )
            SELECT {RECORD_COLUMNS}
            FROM p
                     LEFT JOIN bi.users u ON u.id = p.user_id
            "#
        );

        let record: ProjectRecord = sqlx::query_as(&sql)
            .bind(project.name)
            .bind(project.description)
            .bind(project.pic)
            .bind(project.org_id)
            .bind(project.visibility)
            .bind(project.user_id)
            .fetch_one(&self.pool)
            .await?;

        debug!("✅ 项目创建成功: {:#?}", record);
        Ok(record)
    }

    async fn get_project_by_id(&self, id: i64) -> DatabaseResult<ProjectRecord> {
        debug!("🔍 根据 ID 获取项目: {}", id);

        let sql = format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM bi.projects p
                     LEFT JOIN bi.users u ON u.id = p.user_id
            WHERE p.id = $1
            LIMIT 1
            "#
        );

        let record: ProjectRecord = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("project {id}")))?;

        debug!("✅ 项目获取成功: {:#?}", record);
        Ok(record)
    }

    /// 更新项目信息
    ///
    /// 更新数据中的字段都是[`Option`]，因此使用了`postgresql`中的`coalesce`函数，
    /// 用户输入的值为None时会保留之前的值。
    async fn update_project(&self, id: i64, update: ProjectUpdate) -> DatabaseResult<ProjectRecord> {
        debug!("🔄 更新项目 {} 信息: {:#?}", id, update);

        let sql = format!(
            r#"
            WITH p AS (
                UPDATE bi.projects
                SET name        = coalesce($2, name),
                    description = coalesce($3, description),
                    pic         = coalesce($4, pic),
                    visibility  = coalesce($5, visibility),
                    updated_at  = now()
                WHERE id = $1
                RETURNING *
            )
            SELECT {RECORD_COLUMNS}
            FROM p
                     LEFT JOIN bi.users u ON u.id = p.user_id
            "#
        );

        let record: ProjectRecord = sqlx::query_as(&sql)
            .bind(id)
            .bind(update.name)
            .bind(update.description)
            .bind(update.pic)
            .bind(update.visibility)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("project {id}")))?;

        debug!("✅ 项目更新成功: {:#?}", record);
        Ok(record)
    }

    async fn delete_project(&self, id: i64) -> DatabaseResult<ProjectRecord> {
        debug!("🗑️ 删除项目: {}", id);

        let sql = format!(
            r#"
            WITH p AS (
                DELETE FROM bi.projects
                WHERE id = $1
                RETURNING *
            )
            SELECT {RECORD_COLUMNS}
            FROM p
                     LEFT JOIN bi.users u ON u.id = p.user_id
            "#
        );

        let record: ProjectRecord = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("project {id}")))?;

        debug!("✅ 项目删除成功: {:#?}", record);
        Ok(record)
    }

    async fn organization_exists(&self, org_id: i64) -> DatabaseResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bi.organizations WHERE id = $1)")
            .bind(org_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
