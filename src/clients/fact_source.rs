use std::future::Future;

use crate::error::Result;

/// 事实来源
///
/// 每次调用最多返回一条事实；`Ok(None)` 表示本次没有事实，不算错误
///
/// # 实现
/// - [`NumbersClient`](super::NumbersClient)：线上 Numbers API
/// - 测试中的脚本化实现
pub trait FactSource: Send + Sync {
    fn fetch_fact(&self, number: u64) -> impl Future<Output = Result<Option<String>>> + Send;
}
