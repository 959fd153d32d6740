//! 数字处理上下文
//!
//! 封装"我正在处理第几个数字"这一信息

use std::fmt::Display;

/// 数字处理上下文
#[derive(Debug, Clone, Copy)]
pub struct NumberCtx {
    pub number: u64,

    /// 在本次提交中的序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 本次提交的数字总数
    pub total: usize,
}

impl NumberCtx {
    pub fn new(number: u64, index: usize, total: usize) -> Self {
        Self {
            number,
            index,
            total,
        }
    }
}

impl Display for NumberCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[数字 {} #{}/{}]", self.number, self.index, self.total)
    }
}
