//! 测试共享工具
//!
//! 提供内存版本的项目仓库，行为与 Postgres 实现保持一致。

#![allow(dead_code)]

use database::{
    DatabaseError, DatabaseResult, ProjectCreate, ProjectFilter, ProjectRecord, ProjectRepositoryTrait, ProjectSearchResult,
    ProjectUpdate,
};
use shared_lib::UnknownVisibility;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use web_service::services::ProjectService;
use web_service::AppState;

pub const ORG_ID: i64 = 7;
pub const ALICE: i64 = 3;
pub const BOB: i64 = 4;

#[derive(Clone)]
struct User {
    username: String,
    email: Option<String>,
    avatar: Option<String>,
}

#[derive(Default)]
struct Tables {
    organizations: HashSet<i64>,
    users: HashMap<i64, User>,
    projects: BTreeMap<i64, ProjectCreate>,
    next_id: i64,
}

impl Tables {
    fn record(&self, id: i64, project: &ProjectCreate) -> ProjectRecord {
        let user = self.users.get(&project.user_id);
        ProjectRecord {
            id,
            name: project.name.clone(),
            description: project.description.clone(),
            pic: project.pic.clone(),
            org_id: project.org_id,
            visibility: project.visibility,
            user_id: project.user_id,
            creator_username: user.map(|u| u.username.clone()),
            creator_email: user.and_then(|u| u.email.clone()),
            creator_avatar: user.and_then(|u| u.avatar.clone()),
        }
    }
}

/// 内存项目仓库
#[derive(Default)]
pub struct InMemoryProjectRepository {
    tables: Mutex<Tables>,
}

impl InMemoryProjectRepository {
    /// 预置一个组织和两个用户（alice/bob）
    pub fn seeded() -> Self {
        let repo = Self::default();
        {
            let mut tables = repo.tables.lock().unwrap();
            tables.organizations.insert(ORG_ID);
            tables.users.insert(
                ALICE,
                User {
                    username: "alice".to_string(),
                    email: Some("alice@example.com".to_string()),
                    avatar: None,
                },
            );
            tables.users.insert(
                BOB,
                User {
                    username: "bob".to_string(),
                    email: None,
                    avatar: Some("/avatars/bob.png".to_string()),
                },
            );
        }
        repo
    }

    /// 直接插入一个项目，返回项目ID
    pub fn insert(&self, name: &str, user_id: i64, visibility: Option<bool>) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        tables.next_id += 1;
        let id = tables.next_id;
        tables.projects.insert(
            id,
            ProjectCreate {
                name: name.to_string(),
                description: None,
                pic: None,
                org_id: ORG_ID,
                visibility,
                user_id,
            },
        );
        id
    }

    pub fn contains(&self, id: i64) -> bool {
        self.tables.lock().unwrap().projects.contains_key(&id)
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for InMemoryProjectRepository {
    async fn find_projects(&self, filter: ProjectFilter, page_size: i64, offset: i64) -> DatabaseResult<ProjectSearchResult> {
        let tables = self.tables.lock().unwrap();
        let matched: Vec<ProjectRecord> = tables
            .projects
            .iter()
            .filter(|(_, p)| filter.name.as_ref().map_or(true, |n| p.name.contains(n.as_str())))
            .filter(|(_, p)| filter.org_id.map_or(true, |org| p.org_id == org))
            .filter(|(_, p)| filter.caller == Some(p.user_id) || filter.unknown_visibility.is_public(p.visibility))
            .map(|(id, p)| tables.record(*id, p))
            .collect();

        let total = matched.len() as u32;
        let projects = matched.into_iter().skip(offset as usize).take(page_size as usize).collect();

        Ok(ProjectSearchResult { projects, total })
    }

    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectRecord> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_id += 1;
        let id = tables.next_id;
        let record = tables.record(id, &project);
        tables.projects.insert(id, project);
        Ok(record)
    }

    async fn get_project_by_id(&self, id: i64) -> DatabaseResult<ProjectRecord> {
        let tables = self.tables.lock().unwrap();
        tables
            .projects
            .get(&id)
            .map(|p| tables.record(id, p))
            .ok_or_else(|| DatabaseError::not_found(format!("project {id}")))
    }

    async fn update_project(&self, id: i64, update: ProjectUpdate) -> DatabaseResult<ProjectRecord> {
        let mut tables = self.tables.lock().unwrap();
        let project = tables
            .projects
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::not_found(format!("project {id}")))?;

        if let Some(name) = update.name {
            project.name = name;
        }
        if update.description.is_some() {
            project.description = update.description;
        }
        if update.pic.is_some() {
            project.pic = update.pic;
        }
        if update.visibility.is_some() {
            project.visibility = update.visibility;
        }

        let project = project.clone();
        Ok(tables.record(id, &project))
    }

    async fn delete_project(&self, id: i64) -> DatabaseResult<ProjectRecord> {
        let mut tables = self.tables.lock().unwrap();
        let project = tables
            .projects
            .remove(&id)
            .ok_or_else(|| DatabaseError::not_found(format!("project {id}")))?;
        Ok(tables.record(id, &project))
    }

    async fn organization_exists(&self, org_id: i64) -> DatabaseResult<bool> {
        Ok(self.tables.lock().unwrap().organizations.contains(&org_id))
    }
}

/// 基于内存仓库创建共享状态
pub fn app_state(repo: Arc<InMemoryProjectRepository>, policy: UnknownVisibility) -> AppState {
    AppState::new(Arc::new(ProjectService::new(repo, policy)))
}
