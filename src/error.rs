//! 错误类型
//!
//! 库内统一使用 [`AppError`]，二进制入口再用 anyhow 包一层

use thiserror::Error;

/// 页面上统一展示的网络错误文案
pub const GENERIC_FETCH_ERROR: &str = "Error fetching facts.";

/// 输入无法解析时的提示
const WHOLE_NUMBERS_HINT: &str =
    "Please enter whole numbers or valid ranges (e.g., 3, 5..10, or 1-4).";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 规范化之后没有任何 token
    #[error("输入为空: 没有可用的数字或范围")]
    InputEmpty,

    /// 有 token，但没有一个能解析成整数
    #[error("输入中没有可解析的整数")]
    NoIntegers,

    /// 范围的某一端不是整数（例如 `-5`、`3-4..9`）
    #[error("范围格式错误: {token}")]
    MalformedRange { token: String },

    /// 展开后的数字数量超过上限
    #[error("展开后的数字过多: {count} 超过上限 {limit}")]
    TooManyNumbers { count: usize, limit: usize },

    /// 请求没有完成（连接失败、超时等）
    #[error("请求数字 {number} 的事实失败: {source}")]
    Network {
        number: u64,
        #[source]
        source: reqwest::Error,
    },

    /// 接口返回了非成功状态码
    #[error("数字 {number} 的接口返回非成功状态: {status}")]
    Status { number: u64, status: u16 },

    /// 响应体不是合法 JSON
    #[error("解析数字 {number} 的响应失败: {source}")]
    Decode {
        number: u64,
        #[source]
        source: serde_json::Error,
    },

    /// 取消信号已触发
    #[error("请求已取消")]
    Cancelled,

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// 展示给用户的文案
    ///
    /// 网络相关错误只给出通用提示，细节走日志
    pub fn user_message(&self) -> String {
        match self {
            AppError::InputEmpty => {
                "Please provide one or more comma-separated numbers or ranges".to_string()
            }
            AppError::NoIntegers => WHOLE_NUMBERS_HINT.to_string(),
            AppError::MalformedRange { token } => {
                format!("Invalid range \"{}\". {}", token, WHOLE_NUMBERS_HINT)
            }
            AppError::TooManyNumbers { count, limit } => format!(
                "Too many numbers requested ({}); the limit is {}.",
                count, limit
            ),
            AppError::Network { .. } | AppError::Status { .. } | AppError::Decode { .. } => {
                GENERIC_FETCH_ERROR.to_string()
            }
            AppError::Cancelled => "Fact lookup was cancelled.".to_string(),
            AppError::Config(msg) => format!("Configuration error: {}", msg),
            AppError::Io(_) => GENERIC_FETCH_ERROR.to_string(),
        }
    }

    /// 是否属于输入校验错误（不会发起任何网络请求）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::InputEmpty
                | AppError::NoIntegers
                | AppError::MalformedRange { .. }
                | AppError::TooManyNumbers { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_errors_share_generic_message() {
        let err = AppError::Status {
            number: 42,
            status: 503,
        };
        assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_malformed_range_names_token() {
        let err = AppError::MalformedRange {
            token: "-5".to_string(),
        };
        assert!(err.user_message().contains("\"-5\""));
        assert!(err.is_input_error());
    }
}
