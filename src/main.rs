use std::io::Read;

use anyhow::{Context, Result};
use number_facts::utils::logging;
use number_facts::{App, CancelToken, Config, TerminalPresenter};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("无法加载配置")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let raw_input = read_raw_input()?;
    let mut presenter = TerminalPresenter::stdout(config.output_json);

    // Ctrl-C 时取消剩余请求
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    // 初始化并运行应用
    // 输入错误退出码 2，其余失败退出码 1
    let app = App::initialize(config)?;
    if let Err(e) = app.submit(&raw_input, &mut presenter, &cancel).await {
        std::process::exit(if e.is_input_error() { 2 } else { 1 });
    }

    Ok(())
}

/// 命令行参数用逗号拼接；没有参数时读 stdin
fn read_raw_input() -> Result<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args.join(","));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("无法读取标准输入")?;
    Ok(buffer.replace('\n', ","))
}
