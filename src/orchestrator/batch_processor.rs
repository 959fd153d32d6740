//! 批量数字处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是一次提交的入口，负责从原始输入到最终展示的全过程。
//!
//! ## 核心功能
//!
//! 1. **输入解析**：规范化、展开、去重，输入无效时直接报错，不发请求
//! 2. **回显输入**：把压缩后的数字列表交给 Presenter
//! 3. **并发控制**：最多 `max_concurrent_numbers` 个数字同时拉取
//! 4. **进度与排序**：每完成一个数字更新进度，结果始终按数字升序
//! 5. **超时取消**：可选的整体超时，到点触发 CancelToken
//! 6. **全局统计**：汇总成功/占位数量

use std::collections::BTreeMap;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{error, warn};

use crate::clients::{FactSource, NumbersClient};
use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::CancelToken;
use crate::models::FactRecord;
use crate::presenter::Presenter;
use crate::services::{InputNormalizer, ParsedInput, ResultWriter};
use crate::utils::logging;
use crate::workflow::{FactFlow, FlowResult, NumberCtx};

/// 应用主结构
pub struct App<S> {
    config: Config,
    normalizer: InputNormalizer,
    flow: FactFlow<S>,
    result_writer: Option<ResultWriter>,
}

impl App<NumbersClient> {
    /// 使用线上 Numbers API 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        logging::log_startup(&config);

        let client = NumbersClient::new(&config)?;
        Ok(Self::with_source(config, client))
    }
}

impl<S: FactSource> App<S> {
    /// 使用任意事实来源创建应用
    pub fn with_source(config: Config, source: S) -> Self {
        Self {
            normalizer: InputNormalizer::new(&config),
            flow: FactFlow::new(source, &config),
            result_writer: config.results_file.as_deref().map(ResultWriter::with_path),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn flow(&self) -> &FactFlow<S> {
        &self.flow
    }

    /// 处理一次提交
    ///
    /// # 返回
    /// 按数字升序排列的全部结果
    ///
    /// # 错误
    /// 输入错误、网络错误（Abort 策略下）、取消；错误文案已交给 Presenter
    pub async fn submit<P>(
        &self,
        raw: &str,
        presenter: &mut P,
        cancel: &CancelToken,
    ) -> Result<Vec<FactRecord>>
    where
        P: Presenter + ?Sized,
    {
        let parsed = match self.normalizer.parse(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("⚠️ 输入无效: {}", e);
                presenter.render_error(&e.user_message());
                return Err(e);
            }
        };

        presenter.show_input(&parsed.condensed);

        let total = parsed.numbers.len();
        logging::log_numbers_loaded(&parsed.condensed, total, self.config.max_concurrent_numbers);
        presenter.set_progress(0, total);

        let timer = self
            .config
            .submission_timeout_secs
            .filter(|&secs| secs > 0)
            .map(|secs| cancel.cancel_after(Duration::from_secs(secs)));

        let outcome = self.fetch_all(&parsed, presenter, cancel).await;

        if let Some(timer) = timer {
            timer.abort();
        }

        match outcome {
            Ok(records) => {
                if !self.config.incremental_render {
                    presenter.render(&records);
                }
                if let Some(writer) = &self.result_writer {
                    if let Err(e) = writer.write(&parsed.condensed, &records) {
                        warn!("⚠️ 结果写入失败: {}", e);
                    }
                }
                Ok(records)
            }
            Err(e) => {
                error!("❌ 本次提交失败: {}", e);
                presenter.render_error(&e.user_message());
                Err(e)
            }
        }
    }

    /// 并发拉取所有数字
    ///
    /// 任一数字返回错误时立即停止，未完成的请求随 stream 一起被丢弃
    async fn fetch_all<P>(
        &self,
        parsed: &ParsedInput,
        presenter: &mut P,
        cancel: &CancelToken,
    ) -> Result<Vec<FactRecord>>
    where
        P: Presenter + ?Sized,
    {
        let total = parsed.numbers.len();
        let flow = &self.flow;

        let mut pending = stream::iter(
            parsed
                .numbers
                .iter()
                .enumerate()
                .map(|(idx, &number)| NumberCtx::new(number, idx + 1, total)),
        )
        .map(move |ctx| flow.run(ctx, cancel))
        .buffer_unordered(self.config.max_concurrent_numbers);

        let mut results: BTreeMap<u64, FactRecord> = BTreeMap::new();
        let mut stats = SubmissionStats {
            total,
            ..Default::default()
        };

        while let Some(outcome) = pending.next().await {
            let outcome = outcome?;
            match &outcome {
                FlowResult::Fetched(record) if record.facts.len() < self.config.target_fact_count => {
                    stats.partial += 1
                }
                FlowResult::Fetched(_) => stats.complete += 1,
                FlowResult::Substituted(_) => stats.substituted += 1,
            }

            let record = outcome.into_record();
            results.insert(record.number, record);
            presenter.set_progress(results.len(), total);

            // BTreeMap 保证每次刷新都是升序，与完成顺序无关
            if self.config.incremental_render {
                let snapshot: Vec<FactRecord> = results.values().cloned().collect();
                presenter.render(&snapshot);
            }
        }

        logging::print_final_stats(stats.complete, stats.partial, stats.substituted, stats.total);

        Ok(results.into_values().collect())
    }
}

/// 一次提交的统计
#[derive(Debug, Default)]
struct SubmissionStats {
    complete: usize,
    partial: usize,
    substituted: usize,
    total: usize,
}
