//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口
//!
//! ## Repository Trait 约束 📚
//!
//! 所有 Repository trait 都使用 `Send + Sync + 'static` 约束：
//!
//! - `Send`：异步方法返回的 `Future` 需要在不同线程间传递
//! - `Sync`：多个并发请求同时访问同一个 Repository 实例
//! - `'static`：作为应用服务长期运行，可以放入 `Arc<dyn ...>` 中
//!
//! trait 通过 [`async_trait`] 保持对象安全，Web 层以 `Arc<dyn ProjectRepositoryTrait>`
//! 的形式持有仓库，测试时可以换成内存实现：
//!
//! ```ignore
//! let repository: Arc<dyn ProjectRepositoryTrait> = Arc::new(ProjectRepository::new(pool.clone()));
//! let record = repository.get_project_by_id(42).await?;
//! ```

pub mod project;

// 重新导出
pub use project::ProjectRepositoryTrait;
