//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次提交的完整调度，是整个系统的"指挥中心"。
//!
//! - 解析输入并回显压缩后的数字列表
//! - 控制并发数量（buffer_unordered）
//! - 汇总结果、更新进度、交给 Presenter 展示
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<u64>)
//!     ↓
//! workflow::FactFlow (处理单个数字)
//!     ↓
//! services (能力层：normalize / fetch / write)
//!     ↓
//! clients + infrastructure (Numbers API / HttpExecutor / CancelToken)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一控制流**：所有请求都在同一个任务里轮询，结果集合只有编排层写
//! 2. **向下依赖**：编排层 → workflow → services → clients → infrastructure
//! 3. **无业务逻辑**：只做调度和统计

pub mod batch_processor;

pub use batch_processor::App;
