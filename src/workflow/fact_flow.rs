//! 单个数字的处理流程 - 流程层
//!
//! 核心职责：拉取一个数字的事实，并按配置决定失败时怎么办
//!
//! 流程顺序：
//! 1. FactFetcher 收集事实
//! 2. 失败时按 FailurePolicy 处理：中止（向上返回错误）或写入占位事实

use tracing::{error, info, warn};

use crate::clients::FactSource;
use crate::config::{Config, FailurePolicy};
use crate::error::{AppError, Result};
use crate::infrastructure::CancelToken;
use crate::models::FactRecord;
use crate::services::FactFetcher;
use crate::workflow::number_ctx::NumberCtx;

/// 单个数字的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowResult {
    /// 正常拉取（事实数可能少于目标）
    Fetched(FactRecord),
    /// 拉取失败，已用占位事实代替
    Substituted(FactRecord),
}

impl FlowResult {
    pub fn record(&self) -> &FactRecord {
        match self {
            FlowResult::Fetched(record) | FlowResult::Substituted(record) => record,
        }
    }

    pub fn into_record(self) -> FactRecord {
        match self {
            FlowResult::Fetched(record) | FlowResult::Substituted(record) => record,
        }
    }
}

/// 单个数字的处理流程
///
/// - 只依赖 FactFetcher 能力
/// - 不持有结果集合，不做展示
pub struct FactFlow<S> {
    fetcher: FactFetcher<S>,
    target_count: usize,
    policy: FailurePolicy,
    placeholder_fact: String,
}

impl<S: FactSource> FactFlow<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            fetcher: FactFetcher::from_config(source, config),
            target_count: config.target_fact_count,
            policy: config.failure_policy,
            placeholder_fact: config.placeholder_fact.clone(),
        }
    }

    pub fn fetcher(&self) -> &FactFetcher<S> {
        &self.fetcher
    }

    pub async fn run(&self, ctx: NumberCtx, cancel: &CancelToken) -> Result<FlowResult> {
        match self.fetcher.fetch_facts(ctx.number, cancel).await {
            Ok(facts) => {
                if facts.len() < self.target_count {
                    info!(
                        "{} ✓ 完成，只找到 {}/{} 条不同事实",
                        ctx,
                        facts.len(),
                        self.target_count
                    );
                } else {
                    info!("{} ✓ 完成，{} 条事实", ctx, facts.len());
                }
                Ok(FlowResult::Fetched(FactRecord::new(ctx.number, facts)))
            }
            // 取消与策略无关，总是向上返回
            Err(AppError::Cancelled) => {
                warn!("{} ⚠️ 已取消", ctx);
                Err(AppError::Cancelled)
            }
            Err(e) => match self.policy {
                FailurePolicy::Abort => {
                    error!("{} ❌ 拉取失败: {}", ctx, e);
                    Err(e)
                }
                FailurePolicy::Placeholder => {
                    error!("{} ❌ 拉取失败，使用占位事实: {}", ctx, e);
                    Ok(FlowResult::Substituted(FactRecord::placeholder(
                        ctx.number,
                        self.placeholder_fact.clone(),
                    )))
                }
            },
        }
    }
}
