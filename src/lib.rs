//! Evaluare - 学校考试评分后端服务
//!
//! 基于 Actix Web 构建的评分系统后端：管理员开通班级、教师、学生与考试，
//! 教师为所授班级的学生登记练习所做的变体。
//!
//! # 架构
//! - `config`: 配置管理
//! - `domain`: 核心业务规则（权限、开通、评分）
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: HTTP 服务层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod domain;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
