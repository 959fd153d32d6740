//! HTTP 执行器 - 基础设施层
//!
//! 持有唯一的 reqwest::Client，只暴露"发 GET 请求"的能力

use std::time::Duration;

use crate::error::{AppError, Result};

/// 一次 GET 请求的原始结果
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 执行器
///
/// 职责：
/// - 持有 Client（内部是 Arc，clone 代价很低）
/// - 不认识数字、事实
/// - 不解析响应体
#[derive(Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
}

impl HttpExecutor {
    /// 创建带请求超时的执行器
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("无法创建 HTTP 客户端: {}", e)))?;
        Ok(Self { client })
    }

    /// 发起 GET 请求，返回状态码和响应文本
    ///
    /// 非 2xx 状态不算错误，由调用方判断
    pub async fn get(&self, url: &str) -> reqwest::Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
