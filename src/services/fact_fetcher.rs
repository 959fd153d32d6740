//! 事实拉取服务 - 业务能力层
//!
//! 只负责"为一个数字收集若干条不同的事实"，不关心失败后的兜底策略
//!
//! 接口每次只返回一条事实，而且可能重复，所以需要反复请求：
//! - 收集到 `target_count` 条不同事实时停止
//! - 请求次数用完时停止，返回已收集到的部分（不是错误）
//!
//! 同一个数字的请求严格串行，每次是否继续取决于当前集合大小

use std::collections::HashSet;

use tracing::debug;

use crate::clients::FactSource;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::infrastructure::CancelToken;

/// 事实拉取服务
pub struct FactFetcher<S> {
    source: S,
    target_count: usize,
    max_calls: usize,
}

impl<S: FactSource> FactFetcher<S> {
    pub fn new(source: S, target_count: usize, max_calls: usize) -> Self {
        Self {
            source,
            target_count,
            max_calls,
        }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(
            source,
            config.target_fact_count,
            config.max_calls_per_number,
        )
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 拉取某个数字的事实
    ///
    /// # 返回
    /// 按发现顺序排列的不同事实，数量不超过 `target_count`
    ///
    /// # 错误
    /// - 任意一次请求失败，直接返回该错误
    /// - 取消信号触发：[`AppError::Cancelled`]
    pub async fn fetch_facts(&self, number: u64, cancel: &CancelToken) -> Result<Vec<String>> {
        let mut facts: Vec<String> = Vec::with_capacity(self.target_count);
        let mut seen: HashSet<String> = HashSet::new();
        let mut calls = 0;

        while facts.len() < self.target_count && calls < self.max_calls {
            if cancel.is_cancelled() {
                return Err(AppError::Cancelled);
            }
            calls += 1;

            let fetched = tokio::select! {
                result = self.source.fetch_fact(number) => result?,
                _ = cancel.cancelled() => return Err(AppError::Cancelled),
            };

            if let Some(text) = fetched {
                if seen.insert(text.clone()) {
                    facts.push(text);
                }
            }
        }

        if facts.len() < self.target_count {
            debug!(
                "数字 {} 请求次数用完: {} 次调用，{}/{} 条事实",
                number,
                calls,
                facts.len(),
                self.target_count
            );
        } else {
            debug!("数字 {} 收集完成: {} 次调用", number, calls);
        }

        Ok(facts)
    }
}
