//! 모니터링 에러 타입.
//!
//! 폴링 루프가 구분해야 하는 실패 유형을 정의합니다.
//! 카탈로그 조회 실패만 치명적이고 나머지는 해당 주기만 건너뜁니다.

use thiserror::Error;

/// 모니터링 에러.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// 마켓 카탈로그 조회 실패 (시작 시 치명적)
    #[error("마켓 카탈로그를 가져올 수 없습니다: {0}")]
    CatalogUnavailable(String),

    /// 환율 조회 실패 (해당 주기 정규화 생략)
    #[error("환율을 가져올 수 없습니다: {0}")]
    RateUnavailable(String),

    /// 배치 시세 조회 중 일부 청크 실패 (해당 주기 중단)
    #[error("시세 조회 실패 (청크 {chunk}/{chunks}): {reason}")]
    TickerFetchPartial {
        /// 실패한 청크 번호 (1부터)
        chunk: usize,
        /// 전체 청크 수
        chunks: usize,
        /// 원인
        reason: String,
    },

    /// 응답 형식 오류
    #[error("잘못된 응답 형식: {0}")]
    MalformedResponse(String),

    /// 사용자 중단 (Ctrl+C)
    #[error("사용자에 의해 중단되었습니다")]
    UserInterrupt,

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 파일 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// 모니터링 작업을 위한 Result 타입.
pub type MonitorResult<T> = Result<T, MonitorError>;

impl MonitorError {
    /// 루프를 끝내야 하는 에러인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MonitorError::CatalogUnavailable(_) | MonitorError::UserInterrupt
        )
    }

    /// 다음 주기에 재시도하면 되는 에러인지 확인합니다.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            MonitorError::RateUnavailable(_)
                | MonitorError::TickerFetchPartial { .. }
                | MonitorError::MalformedResponse(_)
        )
    }
}

impl From<::config::ConfigError> for MonitorError {
    fn from(err: ::config::ConfigError) -> Self {
        MonitorError::Config(err.to_string())
    }
}
