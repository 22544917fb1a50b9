//! Assignment Tracker - 按角色限定范围的作业跟踪服务
//!
//! 基于 Actix Web 构建。教师发布、修改、删除自己的作业；
//! 学生查看可见作业、截止提醒与完成进度。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `policies`: 授权、可见范围、截止状态与筛选规则
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod policies;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
