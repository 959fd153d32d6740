//! 规范化后的单个 token

use crate::error::{AppError, Result};

/// 范围标记
pub const RANGE_MARKER: &str = "..";

/// 一个逗号分隔的输入单元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizedToken {
    Single(u64),
    /// 闭区间；`start > end` 时展开为空
    Range { start: u64, end: u64 },
}

impl NormalizedToken {
    /// 解析已规范化的 token
    ///
    /// - `a..b` / `a-b` 两端都必须是整数，否则返回 [`AppError::MalformedRange`]
    /// - 单个数字解析失败（溢出）时返回 `Ok(None)`，由调用方静默丢弃
    /// - 不支持负数：`-5` 是缺少起点的范围
    pub fn parse(token: &str) -> Result<Option<Self>> {
        let bounds = token
            .split_once(RANGE_MARKER)
            .or_else(|| token.split_once('-'));

        match bounds {
            Some((start, end)) => {
                let malformed = || AppError::MalformedRange {
                    token: token.to_string(),
                };
                let start = start.trim().parse::<u64>().map_err(|_| malformed())?;
                let end = end.trim().parse::<u64>().map_err(|_| malformed())?;
                Ok(Some(NormalizedToken::Range { start, end }))
            }
            None => Ok(token.trim().parse::<u64>().ok().map(NormalizedToken::Single)),
        }
    }

    /// 展开后的元素个数
    pub fn len(&self) -> u64 {
        match *self {
            NormalizedToken::Single(_) => 1,
            NormalizedToken::Range { start, end } if start <= end => (end - start).saturating_add(1),
            NormalizedToken::Range { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u64> {
        match *self {
            NormalizedToken::Single(n) => n..=n,
            NormalizedToken::Range { start, end } => start..=end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_range_styles() {
        assert_eq!(
            NormalizedToken::parse("3..7").unwrap(),
            Some(NormalizedToken::Range { start: 3, end: 7 })
        );
        assert_eq!(
            NormalizedToken::parse("1-4").unwrap(),
            Some(NormalizedToken::Range { start: 1, end: 4 })
        );
        assert_eq!(
            NormalizedToken::parse("42").unwrap(),
            Some(NormalizedToken::Single(42))
        );
    }

    #[test]
    fn test_descending_range_is_empty() {
        let token = NormalizedToken::parse("5..3").unwrap().unwrap();
        assert!(token.is_empty());
        assert_eq!(token.iter().count(), 0);
    }

    #[test]
    fn test_leading_dash_is_not_negative() {
        let err = NormalizedToken::parse("-5").unwrap_err();
        assert!(matches!(err, AppError::MalformedRange { .. }));
    }

    #[test]
    fn test_overflowing_single_is_dropped() {
        assert_eq!(NormalizedToken::parse("99999999999999999999999").unwrap(), None);
    }
}
