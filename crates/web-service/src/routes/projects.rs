//! 项目相关接口
//!
//! 所有接口都通过可选的 `x-user-id` 请求头识别调用者，返回的
//! [`ProjectSummary`] 中带有调用者在该项目上的权限。

use crate::models::caller::Caller;
use crate::models::common::{Reply, ReplyList};
use crate::models::err::AppError;
use crate::models::projects::{ProjectCreate, ProjectSearch, ProjectSummary, ProjectUpdate};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 根据查询参数搜索项目
///
/// 根据查询参数搜索调用者可见的项目列表，支持分页.
///
/// 查询参数由 [`ProjectSearch`] 参数决定，部分参数为可选参数。
///
/// ## Json化
///
/// 通过`Json(search): Json<ProjectSearch>`这种语法，框架能自动将body数据反序列化为[`ProjectSearch`]对象，如果
/// 反序列化失败会直接返回4xx错误。
///
/// ## 返回值
///
/// 1. [`Json`] 会对内部类型进行json序列化，保证返回的数据是一个合法的json字符串
/// 2. [`ReplyList`] 是我们封装的一个类型，表明结果是一个通用的`api-json`格式列表对象
/// 3. [`ProjectSummary`] 是实际的业务返回对象
/// 4. [`AppError`] 是错误时返回的Error类型，会自动转换为对应的http错误码
#[utoipa::path(post,
    path = "/search-projects",
    tag = "projects",
    request_body = ProjectSearch,
    params(("x-user-id" = Option<i64>, Header, description = "调用者用户ID")),
    responses(
        (status = 200, description = "Search results", body = ReplyList<ProjectSummary>),
        (status = 400, description = "Invalid search parameters")
    ),
)]
pub async fn find_projects(
    State(state): State<AppState>,
    caller: Caller,
    Json(search): Json<ProjectSearch>,
) -> Result<Json<ReplyList<ProjectSummary>>, AppError> {
    debug!("🔍 搜索项目 {:#?}", search);

    // 验证输入参数，确保有效性
    search.validate()?;

    let page = search.page_query;
    let result = state
        .project_service
        .find_projects(caller, search.project_name, search.org_id, i64::from(page.page_size), page.offset())
        .await?;

    Ok(Json(ReplyList::new(result.projects, result.total, page)))
}

/// 创建项目
///
/// 根据用户输入参数创建项目信息，调用者成为项目创建者
#[utoipa::path(post,
    path = "/projects",
    tag = "projects",
    request_body = ProjectCreate,
    params(("x-user-id" = i64, Header, description = "调用者用户ID")),
    responses(
        (status = 200, description = "Create project result", body = Reply<ProjectSummary>),
        (status = 401, description = "Missing caller"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    caller: Caller,
    Json(project): Json<ProjectCreate>,
) -> Result<Json<Reply<ProjectSummary>>, AppError> {
    debug!("Creating project {:#?}", project);

    project.validate()?;

    let project = state.project_service.create_project(caller, project).await?;

    Ok(Json(Reply { data: project }))
}

/// 查询指定项目信息
#[utoipa::path(get,
    path = "/projects/{id}",
    tag = "projects",
    params(
        ("id" = i64, Path, description = "项目ID"),
        ("x-user-id" = Option<i64>, Header, description = "调用者用户ID")
    ),
    responses(
        (status = 200, description = "Project summary", body = ProjectSummary),
        (status = 403, description = "Project is not visible to caller"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    caller: Caller,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectSummary>, AppError> {
    debug!("Getting project id {:#?}", project_id);

    let project = state.project_service.get_project(caller, project_id).await?;

    Ok(Json(project))
}

/// 更新项目信息
///
/// 根据用户指定的 `id` 和 修改信息 [`ProjectUpdate`] 来更新项目信息。
#[utoipa::path(patch,
    path = "/projects/{id}",
    tag = "projects",
    request_body = ProjectUpdate,
    params(
        ("id" = i64, Path, description = "项目ID"),
        ("x-user-id" = i64, Header, description = "调用者用户ID")
    ),
    responses(
        (status = 200, description = "Updated project", body = ProjectSummary),
        (status = 403, description = "Caller is not project admin")
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    caller: Caller,
    Path(project_id): Path<i64>,
    Json(info): Json<ProjectUpdate>,
) -> Result<Json<ProjectSummary>, AppError> {
    debug!("Updating project {} with {:#?}", project_id, info);

    info.validate()?;

    let project = state.project_service.update_project(caller, project_id, info).await?;

    Ok(Json(project))
}

/// 删除指定的项目
#[utoipa::path(delete,
    path = "/projects/{id}",
    tag = "projects",
    params(
        ("id" = i64, Path, description = "项目ID"),
        ("x-user-id" = i64, Header, description = "调用者用户ID")
    ),
    responses(
        (status = 200, description = "Deleted project", body = ProjectSummary),
        (status = 403, description = "Caller is not project admin")
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    caller: Caller,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectSummary>, AppError> {
    debug!("delete project {:#?}", project_id);

    let project = state.project_service.delete_project(caller, project_id).await?;

    Ok(Json(project))
}
