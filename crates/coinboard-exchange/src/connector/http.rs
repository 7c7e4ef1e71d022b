//! 커넥터 공통 HTTP 처리.
//!
//! 모든 요청에 타임아웃과 User-Agent를 적용하고,
//! 응답 상태 코드에 따라 본문을 파싱하거나 `ExchangeError`로 변환합니다.

use coinboard_core::config::HttpConfig;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

use crate::traits::ExchangeResult;
use crate::ExchangeError;

/// 기본 URL이 고정된 공개 API 클라이언트.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// 타임아웃과 User-Agent를 적용해 생성합니다.
    pub fn new(http: &HttpConfig, base_url: &str) -> ExchangeResult<Self> {
        let client = Client::builder()
            .timeout(http.timeout())
            .user_agent(http.user_agent.as_str())
            .build()
            .map_err(|e| {
                ExchangeError::NetworkError(format!("HTTP 클라이언트 생성 실패: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 기본 URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 공개 GET 요청.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(&url).query(params).send().await?;

        handle_response(response).await
    }
}

/// 공통 에러 본문. 거래소마다 형태가 달라 알려진 필드만 봅니다.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<UpbitErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpbitErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ExchangeResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ExchangeError::NetworkError(e.to_string()))?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse response: {} - Body: {}", e, body);
            ExchangeError::ParseError(e.to_string())
        });
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ExchangeError::RateLimited);
    }

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error.and_then(|d| d.message).or(b.message))
        .unwrap_or(body);

    Err(ExchangeError::ApiError {
        code: i32::from(status.as_u16()),
        message,
    })
}
