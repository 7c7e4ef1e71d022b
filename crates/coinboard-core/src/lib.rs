//! # Coinboard Core
//!
//! 시세 모니터의 도메인 타입과 순수 로직을 제공합니다.
//!
//! - 마켓 심볼, 시세 스냅샷, 환산 환율
//! - 정규화(보조 통화 환산, 거래대금 정렬)
//! - 카탈로그 필터링, 코인 집합 비교, 환율 변동률
//! - 숫자 포맷팅
//! - 설정 관리, 로깅 인프라, 에러 타입

pub mod catalog;
pub mod config;
pub mod diff;
pub mod error;
pub mod format;
pub mod logging;
pub mod normalizer;
pub mod rate_delta;
pub mod types;

pub use catalog::select_quote_markets;
pub use config::AppConfig;
pub use diff::{diff_coin_sets, CoinRecord, CoinSetDiff};
pub use error::{MonitorError, MonitorResult};
pub use logging::{init_logging, LogConfig, LogFormat};
pub use normalizer::normalize;
pub use rate_delta::{rate_change, RateDelta};
pub use types::*;
