//! 展示层边界
//!
//! 核心逻辑只通过 [`Presenter`] 输出，不直接操作终端或任何界面状态

pub mod terminal;

pub use terminal::TerminalPresenter;

use crate::models::FactRecord;

pub trait Presenter {
    /// 回显压缩后的输入，在任何网络请求之前调用
    fn show_input(&mut self, condensed: &str);

    /// 展示结果，`records` 已按数字升序排列
    fn render(&mut self, records: &[FactRecord]);

    fn render_error(&mut self, message: &str);

    fn set_progress(&mut self, completed: usize, total: usize);
}

/// 进度百分比，四舍五入到整数
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (completed as f64 / total as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}
