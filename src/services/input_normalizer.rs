//! 输入规范化服务 - 业务能力层
//!
//! 只负责"把用户输入变成数字集合"，不发请求、不关心展示
//!
//! 处理顺序：
//! 1. `normalize` 清洗原始文本，得到逗号分隔的 token 列表
//! 2. `expand` / `build_number_set` 展开范围，去重并升序排列
//! 3. `condense` 把数字集合重新压缩成最短的 token 列表，回显给用户

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::token::{NormalizedToken, RANGE_MARKER};

static NON_TOKEN_CHARS: OnceLock<Regex> = OnceLock::new();
static DOT_RUNS: OnceLock<Regex> = OnceLock::new();
static DASH_RUNS: OnceLock<Regex> = OnceLock::new();
static COMMA_RUNS: OnceLock<Regex> = OnceLock::new();

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("静态正则表达式"))
}

/// 一次完整解析的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// 清洗后的 token 列表（逗号分隔）
    pub normalized: String,
    /// 去重、升序
    pub numbers: Vec<u64>,
    /// 回显给用户的压缩形式
    pub condensed: String,
}

/// 输入规范化服务
pub struct InputNormalizer {
    max_numbers: usize,
}

impl InputNormalizer {
    pub fn new(config: &Config) -> Self {
        Self::with_limit(config.max_numbers)
    }

    pub fn with_limit(max_numbers: usize) -> Self {
        Self { max_numbers }
    }

    /// 解析一次提交的原始输入
    ///
    /// # 错误
    /// - 没有任何 token：[`AppError::InputEmpty`]
    /// - 有 token 但没有整数：[`AppError::NoIntegers`]
    /// - 范围端点不是整数：[`AppError::MalformedRange`]
    /// - 数字过多：[`AppError::TooManyNumbers`]
    pub fn parse(&self, raw: &str) -> Result<ParsedInput> {
        let normalized = normalize(raw);
        let tokens = split_tokens(&normalized);

        if tokens.is_empty() {
            return Err(AppError::InputEmpty);
        }

        let numbers = build_number_set(&tokens, self.max_numbers)?;
        if numbers.is_empty() {
            return Err(AppError::NoIntegers);
        }

        let condensed = condense(&numbers);

        Ok(ParsedInput {
            normalized,
            numbers,
            condensed,
        })
    }
}

/// 清洗原始输入
///
/// 结果可能为空字符串；对结果再次调用不会改变它
pub fn normalize(raw: &str) -> String {
    let kept = cached(&NON_TOKEN_CHARS, r"[^0-9.,\-]").replace_all(raw, "");

    // 两个及以上的点是范围标记，单独的点一律删除（不支持小数）
    let dotted = cached(&DOT_RUNS, r"\.+").replace_all(&kept, |caps: &Captures| {
        if caps[0].len() >= 2 {
            RANGE_MARKER
        } else {
            ""
        }
    });

    // 删点之后可能出现新的连续短横线，所以放在点之后
    let dashed = cached(&DASH_RUNS, r"-{2,}").replace_all(&dotted, "-");
    let commas = cached(&COMMA_RUNS, r",+").replace_all(&dashed, ",");

    commas
        .trim_matches(',')
        .split(',')
        .filter_map(clean_token)
        .collect::<Vec<_>>()
        .join(",")
}

fn clean_token(token: &str) -> Option<String> {
    let token = token.trim().trim_matches('.');
    if token.is_empty() {
        return None;
    }

    // `a..b..c` 只保留首尾
    let parts: Vec<&str> = token.split(RANGE_MARKER).collect();
    if parts.len() > 2 {
        Some(format!(
            "{}{}{}",
            parts[0],
            RANGE_MARKER,
            parts[parts.len() - 1]
        ))
    } else {
        Some(token.to_string())
    }
}

/// 拆分规范化后的字符串
pub fn split_tokens(normalized: &str) -> Vec<String> {
    normalized
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// 展开单个 token
///
/// 降序范围展开为空；单个数字溢出时静默丢弃
pub fn expand(token: &str) -> Result<Vec<u64>> {
    Ok(NormalizedToken::parse(token)?
        .map(|t| t.iter().collect())
        .unwrap_or_default())
}

/// 展开所有 token，去重并升序
pub fn build_number_set<S: AsRef<str>>(tokens: &[S], max_numbers: usize) -> Result<Vec<u64>> {
    let mut set = BTreeSet::new();

    for token in tokens {
        let Some(parsed) = NormalizedToken::parse(token.as_ref())? else {
            continue;
        };

        // 超大范围在展开前就拒绝
        let len = parsed.len();
        if len > max_numbers as u64 {
            return Err(AppError::TooManyNumbers {
                count: usize::try_from(len).unwrap_or(usize::MAX),
                limit: max_numbers,
            });
        }

        set.extend(parsed.iter());
        if set.len() > max_numbers {
            return Err(AppError::TooManyNumbers {
                count: set.len(),
                limit: max_numbers,
            });
        }
    }

    Ok(set.into_iter().collect())
}

/// 把升序、无重复的数字压缩成 token 列表
///
/// 长度 1 的连续段写成 `a`，长度 2 写成 `a,b`，更长的写成 `a..b`
pub fn condense(numbers: &[u64]) -> String {
    let mut iter = numbers.iter().copied();
    let Some(first) = iter.next() else {
        return String::new();
    };

    let mut runs = Vec::new();
    let (mut start, mut end) = (first, first);

    for current in iter {
        if end.checked_add(1) == Some(current) {
            end = current;
            continue;
        }
        runs.push(format_run(start, end));
        start = current;
        end = current;
    }
    runs.push(format_run(start, end));

    runs.join(",")
}

fn format_run(start: u64, end: u64) -> String {
    if start == end {
        start.to_string()
    } else if end - start == 1 {
        format!("{},{}", start, end)
    } else {
        format!("{}{}{}", start, RANGE_MARKER, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRICKY_INPUTS: &[&str] = &[
        "",
        "abc",
        "1,,2...3--4",
        "  42 , 7 ,, 9 ",
        "3.5, 10..12",
        "1-.-2",
        "..5..",
        "1..2..3..4",
        "5....9, -3, ,,,",
        "1 to 10",
        "7.-.8",
        "12-..-14",
        ",.,.,",
        "100...200....300",
    ];

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize("1,,2...3--4"), "1,2..3-4");
    }

    #[test]
    fn test_normalize_strips_noise() {
        assert_eq!(normalize("  42 , 7 ,, 9 "), "42,7,9");
        assert_eq!(normalize("1 to 10"), "110");
        assert_eq!(normalize("abc"), "");
    }

    #[test]
    fn test_normalize_removes_single_dots() {
        assert_eq!(normalize("3.5, 10..12"), "35,10..12");
        assert_eq!(normalize("1-.-2"), "1-2");
    }

    #[test]
    fn test_normalize_keeps_first_and_last_range_part() {
        assert_eq!(normalize("1..2..3..4"), "1..4");
        assert_eq!(normalize("..5.."), "5");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in TRICKY_INPUTS {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "输入: {:?}", raw);
        }
    }

    #[test]
    fn test_expand_edges() {
        assert_eq!(expand("3..3").unwrap(), vec![3]);
        assert_eq!(expand("5..3").unwrap(), Vec::<u64>::new());
        assert_eq!(expand("1-4").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(expand("8").unwrap(), vec![8]);
    }

    #[test]
    fn test_expand_rejects_non_numeric_bound() {
        assert!(matches!(
            expand("2..3-4"),
            Err(AppError::MalformedRange { .. })
        ));
    }

    #[test]
    fn test_negative_looking_input_is_not_negative() {
        let result = InputNormalizer::with_limit(100).parse("-5");
        match result {
            Err(AppError::MalformedRange { token }) => assert_eq!(token, "-5"),
            other => panic!("-5 不应被当作整数: {:?}", other),
        }
    }

    #[test]
    fn test_condense_runs() {
        assert_eq!(condense(&[1, 2, 3, 5, 7, 8]), "1..3,5,7,8");
        assert_eq!(condense(&[]), "");
        assert_eq!(condense(&[4]), "4");
        assert_eq!(condense(&[u64::MAX - 1, u64::MAX]), format!("{},{}", u64::MAX - 1, u64::MAX));
    }

    #[test]
    fn test_condense_then_expand_reproduces_set() {
        let sets: &[&[u64]] = &[
            &[1, 2, 3, 5, 7, 8],
            &[0],
            &[0, 1],
            &[2, 4, 6, 8],
            &[10, 11, 12, 13, 20, 21, 30],
        ];
        for numbers in sets {
            let condensed = condense(numbers);
            let tokens = split_tokens(&condensed);
            let rebuilt = build_number_set(&tokens, 1000).unwrap();
            assert_eq!(&rebuilt, numbers, "压缩结果: {}", condensed);
        }
    }

    #[test]
    fn test_number_set_sorted_and_unique() {
        let tokens = ["9", "3..5", "4-6", "1", "9"];
        assert_eq!(
            build_number_set(&tokens, 100).unwrap(),
            vec![1, 3, 4, 5, 6, 9]
        );
    }

    #[test]
    fn test_number_set_limit() {
        let err = build_number_set(&["1..1000000000000"], 1000).unwrap_err();
        assert!(matches!(err, AppError::TooManyNumbers { limit: 1000, .. }));

        let err = build_number_set(&["1..6", "10..15"], 10).unwrap_err();
        assert!(matches!(err, AppError::TooManyNumbers { count: 12, .. }));
    }

    #[test]
    fn test_parse_reports_empty_and_no_integers() {
        let normalizer = InputNormalizer::with_limit(100);
        assert!(matches!(normalizer.parse("hello"), Err(AppError::InputEmpty)));
        assert!(matches!(normalizer.parse("9..2"), Err(AppError::NoIntegers)));
    }

    #[test]
    fn test_parse_full_pipeline() {
        let parsed = InputNormalizer::with_limit(100)
            .parse("7, 1...3, 2-4,, 10.")
            .unwrap();
        assert_eq!(parsed.normalized, "7,1..3,2-4,10");
        assert_eq!(parsed.numbers, vec![1, 2, 3, 4, 7, 10]);
        assert_eq!(parsed.condensed, "1..4,7,10");
    }
}
