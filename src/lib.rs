//! # Number Facts
//!
//! 输入若干数字和数字范围，从 Numbers API 拉取每个数字的趣味事实
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源，只暴露能力
//! - `HttpExecutor` - 唯一的 reqwest::Client owner，提供 GET 能力
//! - `CancelToken` - 一次提交共享的取消信号
//!
//! ### ② 接口客户端（Clients）
//! - `FactSource` - "给我一条事实"的抽象，测试时替换
//! - `NumbersClient` - `GET {base}/{n}?json`
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个输入或单个数字
//! - `InputNormalizer` - 清洗输入、展开范围、压缩回显
//! - `FactFetcher` - 收集 N 条不同事实或用完请求次数
//! - `ResultWriter` - 追加写结果文件
//!
//! ### ④ 流程层（Workflow）
//! - `NumberCtx` - 上下文封装（数字 + 序号）
//! - `FactFlow` - 拉取 + 失败策略（中止 / 占位）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 一次提交的完整调度，管理并发、进度和展示
//!
//! ### 展示边界
//! - `presenter/` - `Presenter` trait 和终端实现
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod presenter;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{FactSource, NumbersClient};
pub use config::{Config, FailurePolicy};
pub use error::{AppError, Result};
pub use infrastructure::CancelToken;
pub use models::{FactRecord, NormalizedToken};
pub use orchestrator::App;
pub use presenter::{Presenter, TerminalPresenter};
pub use services::{condense, expand, normalize, FactFetcher, InputNormalizer, ParsedInput};
pub use workflow::{FactFlow, FlowResult, NumberCtx};
