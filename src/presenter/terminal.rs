//! 终端展示
//!
//! 结果写到 `out`（默认 stdout），进度写到 `progress`（默认 stderr）
//!
//! 终端不能清屏重绘，增量刷新时每个快照都会完整追加一遍。
//! 文本模式下第二个及之后的快照前会先写一行分隔线；数字较多时建议配合 JSON 输出使用

use std::io::{self, Stderr, Stdout, Write};

use tracing::warn;

use super::{progress_percent, Presenter};
use crate::models::FactRecord;

pub struct TerminalPresenter<W = Stdout, E = Stderr> {
    out: W,
    progress: E,
    json: bool,
    /// 只在百分比变化时才输出进度
    last_percent: Option<u8>,
    /// 已输出的结果快照数
    renders: usize,
}

impl TerminalPresenter {
    pub fn stdout(json: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), json)
    }
}

impl<W: Write, E: Write> TerminalPresenter<W, E> {
    pub fn new(out: W, progress: E, json: bool) -> Self {
        Self {
            out,
            progress,
            json,
            last_percent: None,
            renders: 0,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.progress)
    }

    fn write_records(&mut self, records: &[FactRecord]) -> io::Result<()> {
        if self.json {
            let json = serde_json::to_string_pretty(records)?;
            writeln!(self.out, "{}", json)?;
            return self.out.flush();
        }

        if self.renders > 0 {
            writeln!(self.out, "\n{} ({} numbers)", "-".repeat(40), records.len())?;
        }
        for record in records {
            writeln!(self.out, "\n{}", record.number)?;
            for fact in &record.facts {
                writeln!(self.out, "  {}", fact)?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write, E: Write> Presenter for TerminalPresenter<W, E> {
    fn show_input(&mut self, condensed: &str) {
        if self.json {
            return;
        }
        if let Err(e) = writeln!(self.out, "Numbers: {}", condensed) {
            warn!("写入输出失败: {}", e);
        }
    }

    fn render(&mut self, records: &[FactRecord]) {
        if let Err(e) = self.write_records(records) {
            warn!("写入输出失败: {}", e);
        }
        self.renders += 1;
    }

    fn render_error(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{}", message) {
            warn!("写入输出失败: {}", e);
        }
    }

    fn set_progress(&mut self, completed: usize, total: usize) {
        let percent = progress_percent(completed, total);
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);

        let result = if completed == 0 {
            write!(self.progress, "Loading... {}%", percent)
        } else {
            write!(self.progress, "\rLoading... {}%", percent)
        };
        let result = result
            .and_then(|_| {
                if completed >= total {
                    writeln!(self.progress)
                } else {
                    Ok(())
                }
            })
            .and_then(|_| self.progress.flush());

        if let Err(e) = result {
            warn!("写入进度失败: {}", e);
        }
    }
}
