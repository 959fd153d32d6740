/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing
///
/// `RUST_LOG` 优先；否则默认 info，`verbose` 时为 debug。重复调用不会报错
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 数字事实查询");
    info!("🌐 接口地址: {}", config.api_base_url);
    info!(
        "📊 每个数字目标 {} 条事实，最多请求 {} 次",
        config.target_fact_count, config.max_calls_per_number
    );
    info!("📊 最大并发数: {}", config.max_concurrent_numbers);
    info!("🛡️ 失败策略: {:?}", config.failure_policy);
    info!("{}", "=".repeat(60));
}

/// 记录输入解析结果
///
/// # 参数
/// - `condensed`: 压缩后的输入
/// - `total`: 数字总数
/// - `max_concurrent`: 最大并发数
pub fn log_numbers_loaded(condensed: &str, total: usize, max_concurrent: usize) {
    info!("✓ 解析输入: {}", truncate_text(condensed, 80));
    info!("📋 共 {} 个数字，最多 {} 个同时处理", total, max_concurrent);
}

/// 打印最终统计信息
///
/// # 参数
/// - `complete`: 拿满目标条数的数字
/// - `partial`: 请求次数用完、条数不足的数字
/// - `substituted`: 使用占位事实的数字
/// - `total`: 总数
pub fn print_final_stats(complete: usize, partial: usize, substituted: usize, total: usize) {
    info!("{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完整: {}/{}", complete, total);
    info!("⚠️ 不足: {}", partial);
    info!("❌ 占位: {}", substituted);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
