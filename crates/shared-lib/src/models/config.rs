use color_eyre::eyre::Context;
use color_eyre::{Help, Result};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::Level;

/// 默认的Web服务监听地址
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// 默认的数据库连接池大小
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 40;

/// 配置解析错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// 缺少必填的环境变量
    #[error("缺少环境变量 {0}")]
    Missing(&'static str),

    /// 环境变量的值无法解析
    #[error("环境变量 {key} 的值无效: {value}")]
    Invalid { key: &'static str, value: String },
}

/// 项目 `visibility` 为 null 时的处理策略
///
/// 数据库中的可见性字段是三态的（未知/公开/私有），
/// 未知状态该如何理解由部署方通过 `UNKNOWN_VISIBILITY` 决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownVisibility {
    /// 视为私有项目，只有创建者可见
    #[default]
    Private,

    /// 视为公开项目
    Public,
}

impl UnknownVisibility {
    /// 按照当前策略判断项目是否公开
    pub fn is_public(self, visibility: Option<bool>) -> bool {
        match visibility {
            Some(v) => v,
            None => self == UnknownVisibility::Public,
        }
    }
}

impl FromStr for UnknownVisibility {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(UnknownVisibility::Private),
            "public" => Ok(UnknownVisibility::Public),
            _ => Err(()),
        }
    }
}

/// 程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// postgresql数据库链接字符串
    pub postgresql_conn_str: String,

    /// Web服务监听地址
    ///
    /// 可通过环境变量 `WEB_BIND_ADDR` 来调整
    pub bind_addr: String,

    /// 数据库连接池最大连接数
    ///
    /// 生产环境配置30~40即可，可通过环境变量 `DB_MAX_CONNECTIONS` 来调整
    pub db_max_connections: u32,

    /// 日志级别，环境变量 `LOG_LEVEL`
    pub log_level: Level,

    /// 可见性未知的项目如何处理，环境变量 `UNKNOWN_VISIBILITY`
    pub unknown_visibility: UnknownVisibility,
}

impl AppConfig {
    pub fn load() -> Result<Arc<AppConfig>> {
        // 加载.env文件中的数据注入到环境变量中，方便本地测试
        // 线上环境部署时会直接使用环境变量，不需要.env文件
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())
            .context("Can not load config from environment")
            .suggestion("检查 DATABASE_URL 等环境变量是否设置正确")?;

        Ok(Arc::new(config))
    }

    /// 通过 `lookup` 读取配置项并解析
    ///
    /// `lookup` 返回 `None` 表示该配置项未设置。
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 读取数据库地址信息（仅支持postgresql）
        let postgresql_conn_str = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = lookup("WEB_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        let log_level = parse_or(&lookup, "LOG_LEVEL", Level::DEBUG)?;
        let unknown_visibility = parse_or(&lookup, "UNKNOWN_VISIBILITY", UnknownVisibility::default())?;

        Ok(AppConfig {
            postgresql_conn_str,
            bind_addr,
            db_max_connections,
            log_level,
            unknown_visibility,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> std::result::Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };

    let parsed = value.trim().parse::<T>();
    parsed.map_err(|_| ConfigError::Invalid { key, value })
}
