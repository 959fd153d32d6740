/// Numbers API 客户端
///
/// 封装 `GET {base}/{number}?json` 的调用和响应解析
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::clients::FactSource;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::infrastructure::HttpExecutor;

/// 接口返回的 JSON
///
/// 只有 `text` 是我们关心的，其余字段仅用于日志
#[derive(Debug, Clone, Deserialize)]
pub struct NumberFactResponse {
    pub text: Option<String>,
    pub number: Option<serde_json::Value>,
    pub found: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Numbers API 客户端
pub struct NumbersClient {
    base_url: String,
    executor: HttpExecutor,
}

impl NumbersClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> Result<Self> {
        let executor = HttpExecutor::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::with_executor(&config.api_base_url, executor))
    }

    pub fn with_executor(base_url: &str, executor: HttpExecutor) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            executor,
        }
    }

    /// 某个数字的请求地址
    pub fn fact_url(&self, number: u64) -> String {
        format!("{}/{}?json", self.base_url, number)
    }
}

impl FactSource for NumbersClient {
    async fn fetch_fact(&self, number: u64) -> Result<Option<String>> {
        let url = self.fact_url(number);
        debug!("请求事实: {}", url);

        let response = self
            .executor
            .get(&url)
            .await
            .map_err(|source| AppError::Network { number, source })?;

        if !response.is_success() {
            return Err(AppError::Status {
                number,
                status: response.status,
            });
        }

        parse_fact_body(number, &response.body)
    }
}

/// 解析响应体，缺少 `text` 视为本次没有事实
pub fn parse_fact_body(number: u64, body: &str) -> Result<Option<String>> {
    let parsed: NumberFactResponse =
        serde_json::from_str(body).map_err(|source| AppError::Decode { number, source })?;

    debug!(
        "数字 {} 响应: found={:?} type={:?}",
        number, parsed.found, parsed.kind
    );

    Ok(parsed.text.filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_url_layout() {
        let executor = HttpExecutor::new(Duration::from_secs(1)).unwrap();
        let client = NumbersClient::with_executor("http://numbersapi.com/", executor);
        assert_eq!(client.fact_url(42), "http://numbersapi.com/42?json");
    }

    #[test]
    fn test_parse_body_with_text() {
        let body = r#"{"text":"42 is the answer.","number":42,"found":true,"type":"trivia"}"#;
        assert_eq!(
            parse_fact_body(42, body).unwrap(),
            Some("42 is the answer.".to_string())
        );
    }

    #[test]
    fn test_parse_body_without_text_is_not_error() {
        let body = r#"{"number":42,"found":false,"type":"trivia"}"#;
        assert_eq!(parse_fact_body(42, body).unwrap(), None);
    }

    #[test]
    fn test_parse_invalid_body() {
        let err = parse_fact_body(7, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, AppError::Decode { number: 7, .. }));
    }

    /// 访问线上接口
    ///
    /// 运行方式：
    /// ```bash
    /// cargo test test_live_numbers_api -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_live_numbers_api() {
        let _ = tracing_subscriber::fmt::try_init();

        let client = NumbersClient::new(&Config::default()).unwrap();
        let fact = client.fetch_fact(42).await.unwrap();
        println!("42: {:?}", fact);
        assert!(fact.is_some());
    }
}
