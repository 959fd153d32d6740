use crate::error::{AppError, Result};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "NUMBER_FACTS_CONFIG";

/// 单个数字拉取失败时的处理策略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// 任一数字失败，整批中止
    #[default]
    Abort,
    /// 记录错误，用占位事实代替
    Placeholder,
}

impl FromStr for FailurePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "placeholder" => Ok(FailurePolicy::Placeholder),
            other => Err(AppError::Config(format!("未知的失败策略: {}", other))),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Numbers API 根地址
    pub api_base_url: String,
    /// 每个数字期望拿到的不同事实数
    pub target_fact_count: usize,
    /// 每个数字最多请求次数
    pub max_calls_per_number: usize,
    /// 同时处理的数字数量
    pub max_concurrent_numbers: usize,
    /// 展开后允许的数字总数
    pub max_numbers: usize,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 整次提交的超时（秒），0 或缺省表示不限制
    pub submission_timeout_secs: Option<u64>,
    pub failure_policy: FailurePolicy,
    /// Placeholder 策略下使用的占位文本
    pub placeholder_fact: String,
    /// 每完成一个数字就刷新一次结果
    pub incremental_render: bool,
    /// 以 JSON 输出结果
    pub output_json: bool,
    /// 结果追加写入的文件
    pub results_file: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://numbersapi.com".to_string(),
            target_fact_count: 4,
            max_calls_per_number: 20,
            max_concurrent_numbers: 16,
            max_numbers: 1000,
            request_timeout_secs: 10,
            submission_timeout_secs: None,
            failure_policy: FailurePolicy::Abort,
            placeholder_fact: "No facts could be fetched for this number.".to_string(),
            incremental_render: false,
            output_json: false,
            results_file: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从进程环境变量读取，未设置的项使用默认值
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(Self::default(), |key| std::env::var(key).ok())
    }

    /// 先读 `NUMBER_FACTS_CONFIG` 指向的文件（如果有），再叠加环境变量
    pub fn load() -> Result<Self> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(Path::new(&path))?,
            _ => Self::default(),
        };
        let config = Self::from_lookup(base, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// 解析 TOML 文本；`submission_timeout_secs = 0` 视为不限制
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.submission_timeout_secs = config.submission_timeout_secs.filter(|&secs| secs > 0);
        Ok(config)
    }

    /// 在 `base` 之上叠加键值来源
    pub fn from_lookup<F>(base: Self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_base_url: lookup("NUMBERS_API_BASE_URL").unwrap_or(base.api_base_url),
            target_fact_count: parse_var(&lookup, "TARGET_FACT_COUNT")?
                .unwrap_or(base.target_fact_count),
            max_calls_per_number: parse_var(&lookup, "MAX_CALLS_PER_NUMBER")?
                .unwrap_or(base.max_calls_per_number),
            max_concurrent_numbers: parse_var(&lookup, "MAX_CONCURRENT_NUMBERS")?
                .unwrap_or(base.max_concurrent_numbers),
            max_numbers: parse_var(&lookup, "MAX_NUMBERS")?.unwrap_or(base.max_numbers),
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS")?
                .unwrap_or(base.request_timeout_secs),
            submission_timeout_secs: match parse_var::<u64, _>(&lookup, "SUBMISSION_TIMEOUT_SECS")? {
                Some(0) => None,
                Some(secs) => Some(secs),
                None => base.submission_timeout_secs,
            },
            failure_policy: parse_var(&lookup, "FAILURE_POLICY")?.unwrap_or(base.failure_policy),
            placeholder_fact: lookup("PLACEHOLDER_FACT").unwrap_or(base.placeholder_fact),
            incremental_render: parse_var(&lookup, "INCREMENTAL_RENDER")?
                .unwrap_or(base.incremental_render),
            output_json: parse_var(&lookup, "OUTPUT_JSON")?.unwrap_or(base.output_json),
            results_file: lookup("RESULTS_FILE").or(base.results_file),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING")?
                .unwrap_or(base.verbose_logging),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(AppError::Config("api_base_url 不能为空".to_string()));
        }
        if self.max_concurrent_numbers == 0 {
            return Err(AppError::Config(
                "max_concurrent_numbers 必须大于 0".to_string(),
            ));
        }
        if self.max_numbers == 0 {
            return Err(AppError::Config("max_numbers 必须大于 0".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "request_timeout_secs 必须大于 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} 的值无效 ({}): {}", key, raw, e))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_fetch_budget() {
        let config = Config::default();
        assert_eq!(config.target_fact_count, 4);
        assert_eq!(config.max_calls_per_number, 20);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides() {
        let lookup = lookup_from(&[
            ("TARGET_FACT_COUNT", "2"),
            ("FAILURE_POLICY", "Placeholder"),
            ("SUBMISSION_TIMEOUT_SECS", "30"),
            ("INCREMENTAL_RENDER", "true"),
        ]);
        let config = Config::from_lookup(Config::default(), lookup).unwrap();
        assert_eq!(config.target_fact_count, 2);
        assert_eq!(config.failure_policy, FailurePolicy::Placeholder);
        assert_eq!(config.submission_timeout_secs, Some(30));
        assert!(config.incremental_render);
        assert_eq!(config.max_calls_per_number, 20);
    }

    #[test]
    fn test_zero_submission_timeout_disables_it() {
        let base = Config {
            submission_timeout_secs: Some(5),
            ..Config::default()
        };
        let config =
            Config::from_lookup(base, lookup_from(&[("SUBMISSION_TIMEOUT_SECS", "0")])).unwrap();
        assert_eq!(config.submission_timeout_secs, None);
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let err = Config::from_lookup(Config::default(), lookup_from(&[("MAX_NUMBERS", "lots")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_toml_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "http://localhost:8080"
            failure_policy = "placeholder"
            max_concurrent_numbers = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.failure_policy, FailurePolicy::Placeholder);
        assert_eq!(config.max_concurrent_numbers, 4);
        assert_eq!(config.target_fact_count, 4);
    }

    #[test]
    fn test_toml_zero_submission_timeout_disables_it() {
        let config = Config::from_toml_str("submission_timeout_secs = 0").unwrap();
        assert_eq!(config.submission_timeout_secs, None);

        // 环境变量没有覆盖时，文件里的 0 仍然表示不限制
        let config = Config::from_lookup(config, |_| None).unwrap();
        assert_eq!(config.submission_timeout_secs, None);

        let config = Config::from_toml_str("submission_timeout_secs = 15").unwrap();
        assert_eq!(config.submission_timeout_secs, Some(15));
    }

    #[test]
    fn test_validate_rejects_zero_request_timeout() {
        let config = Config::from_toml_str("request_timeout_secs = 0").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = Config {
            max_concurrent_numbers: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
