//! 거래소 에러 타입.

use thiserror::Error;

/// 거래소 관련 에러.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 요청 한도 초과
    #[error("Rate limit exceeded")]
    RateLimited,

    /// API 에러 코드 (HTTP 상태 또는 거래소 상태 코드)
    #[error("API error {code}: {message}")]
    ApiError { code: i32, message: String },

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 응답에 요청한 심볼이 없음
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 알 수 없는 에러
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ExchangeError {
    /// 다음 주기에 재시도하면 회복될 수 있는 에러인지 확인.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExchangeError::NetworkError(_) | ExchangeError::RateLimited | ExchangeError::Timeout(_)
        ) || matches!(self, ExchangeError::ApiError { code, .. } if *code >= 500)
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExchangeError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            ExchangeError::NetworkError(err.to_string())
        } else if err.is_decode() {
            ExchangeError::ParseError(err.to_string())
        } else {
            ExchangeError::Unknown(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(ExchangeError::Timeout("5s".to_string()).is_retryable());
        assert!(ExchangeError::RateLimited.is_retryable());
        assert!(ExchangeError::ApiError {
            code: 503,
            message: "unavailable".to_string()
        }
        .is_retryable());
        assert!(!ExchangeError::ApiError {
            code: 404,
            message: "not found".to_string()
        }
        .is_retryable());
        assert!(!ExchangeError::ParseError("eof".to_string()).is_retryable());
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(ExchangeError::from(err), ExchangeError::ParseError(_)));
    }
}
