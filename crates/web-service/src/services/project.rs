//! 项目服务
//!
//! 提供项目相关的业务逻辑操作：从仓库读取项目记录，计算调用者权限，
//! 最终组装成 [`ProjectSummary`] 返回。

use crate::models::caller::Caller;
use crate::models::err::{AppError, AppResult};
use crate::models::projects::{ProjectCreate, ProjectSummary, ProjectUpdate};
use crate::services::permission::evaluate_permission;
use crate::services::traits::{ProjectServiceTrait, ProjectSummaryPage};
use database::{DatabaseError, ProjectFilter, ProjectRecord, ProjectRepositoryTrait};
use shared_lib::UnknownVisibility;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct ProjectService {
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    unknown_visibility: UnknownVisibility,
}

impl ProjectService {
    pub fn new(project_repository: Arc<dyn ProjectRepositoryTrait>, unknown_visibility: UnknownVisibility) -> Self {
        Self {
            project_repository,
            unknown_visibility,
        }
    }

    /// 组装项目概要，调用者无权访问时返回 [`AppError::Forbidden`]
    fn summarize(&self, caller: Caller, record: ProjectRecord) -> AppResult<ProjectSummary> {
        let permission = evaluate_permission(caller, &record, self.unknown_visibility)
            .ok_or_else(|| AppError::Forbidden(format!("project {} is not visible", record.id)))?;

        Ok(ProjectSummary::from_record(record, permission))
    }

    /// 读取项目并确认调用者是项目管理员
    async fn load_for_admin(&self, caller: Caller, id: i64) -> AppResult<ProjectRecord> {
        caller.require_user()?;

        let record = self.project_repository.get_project_by_id(id).await?;
        let is_admin = evaluate_permission(caller, &record, self.unknown_visibility)
            .is_some_and(|p| p.is_project_admin);

        if !is_admin {
            return Err(AppError::Forbidden(format!("project {id} can only be modified by its admin")));
        }

        Ok(record)
    }
}

#[async_trait::async_trait]
impl ProjectServiceTrait for ProjectService {
    async fn find_projects(
        &self,
        caller: Caller,
        name: Option<String>,
        org_id: Option<i64>,
        page_size: i64,
        offset: i64,
    ) -> AppResult<ProjectSummaryPage> {
        let filter = ProjectFilter {
            name,
            org_id,
            caller: caller.user_id,
            unknown_visibility: self.unknown_visibility,
        };

        let result = self.project_repository.find_projects(filter, page_size, offset).await?;

        // 结果中只保留调用者有权限的项目
        let projects = result
            .projects
            .into_iter()
            .filter_map(|record| self.summarize(caller, record).ok())
            .collect();

        Ok(ProjectSummaryPage {
            projects,
            total: result.total,
        })
    }

    async fn create_project(&self, caller: Caller, project: ProjectCreate) -> AppResult<ProjectSummary> {
        let user_id = caller.require_user()?;

        if !self.project_repository.organization_exists(project.org_id).await? {
            return Err(DatabaseError::not_found(format!("organization {}", project.org_id)).into());
        }

        let record = self
            .project_repository
            .create_project(database::ProjectCreate {
                name: project.name,
                description: project.description,
                pic: project.pic,
                org_id: project.org_id,
                visibility: project.visibility,
                user_id,
            })
            .await?;

        info!("📦 用户 {} 创建了项目 {}", user_id, record.id);
        self.summarize(caller, record)
    }

    async fn get_project(&self, caller: Caller, id: i64) -> AppResult<ProjectSummary> {
        let record = self.project_repository.get_project_by_id(id).await?;
        self.summarize(caller, record)
    }

    async fn update_project(&self, caller: Caller, id: i64, update: ProjectUpdate) -> AppResult<ProjectSummary> {
        self.load_for_admin(caller, id).await?;

        let record = self
            .project_repository
            .update_project(
                id,
                database::ProjectUpdate {
                    name: update.name,
                    description: update.description,
                    pic: update.pic,
                    visibility: update.visibility,
                },
            )
            .await?;

        debug!("项目 {} 已更新", id);
        self.summarize(caller, record)
    }

    async fn delete_project(&self, caller: Caller, id: i64) -> AppResult<ProjectSummary> {
        self.load_for_admin(caller, id).await?;

        let record = self.project_repository.delete_project(id).await?;

        info!("🗑️ 项目 {} 已被用户 {:?} 删除", id, caller.user_id);
        self.summarize(caller, record)
    }
}
