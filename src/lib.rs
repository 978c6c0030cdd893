//! # 产品目录管理
//!
//! - `app`: 产品 CRUD 接口（模型、校验、存储、服务、处理器）
//! - `core`: 统一错误处理、请求日志中间件
//! - `infrastructure`: 配置、日志、数据库连接池
//! - `client`: 调用产品接口的前端（状态机、控制器、终端渲染）
//! - `server`: 路由组装与服务启动

pub mod app;
pub mod client;
pub mod core;
pub mod infrastructure;
pub mod server;

pub use crate::core::error::CoreError;
