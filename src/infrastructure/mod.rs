//! 基础设施层：配置、日志、数据库

pub mod config;
#[cfg(feature = "database")]
pub mod database;
pub mod logger;

pub use config::{load_config, Config, ConfigError};
