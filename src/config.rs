use std::{env, num::NonZeroUsize, thread};

use crate::errors::CustomError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// 服务启动配置，来自环境变量（可由 .env 提供）
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 监听地址，`SLICER_BIND_ADDR`
    pub bind_addr: String,
    /// worker 数量，`SLICER_WORKERS`
    pub workers: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, CustomError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CustomError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("SLICER_BIND_ADDR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let workers = match lookup("SLICER_WORKERS") {
            Some(raw) => {
                let n: usize = raw.trim().parse().map_err(|e| {
                    CustomError::ConfigError(format!("SLICER_WORKERS={raw:?}: {e}"))
                })?;
                if n == 0 {
                    return Err(CustomError::ConfigError(
                        "SLICER_WORKERS must be at least 1".into(),
                    ));
                }
                n
            }
            None => thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        };

        Ok(Self { bind_addr, workers })
    }
}
