//! 시세 공급자 trait 정의.
//!
//! 폴링 루프는 구체 커넥터 대신 이 trait들에 의존하므로
//! 테스트에서는 가짜 구현으로 대체할 수 있습니다.

use async_trait::async_trait;
use coinboard_core::{MarketInfo, Symbol, TickerSnapshot};
use rust_decimal::Decimal;

use crate::ExchangeError;

/// 거래소 작업을 위한 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// 마켓 카탈로그 조회.
#[async_trait]
pub trait MarketCatalog: Send + Sync {
    /// 거래소 이름.
    fn name(&self) -> &str;

    /// 상장된 전체 마켓 목록 조회.
    async fn fetch_markets(&self) -> ExchangeResult<Vec<MarketInfo>>;
}

/// 마켓 시세 조회.
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// 요청 한 번으로 주어진 마켓들의 시세를 조회.
    ///
    /// 응답 순서와 포함 여부는 거래소에 따라 다를 수 있습니다.
    async fn fetch_tickers(&self, symbols: &[Symbol]) -> ExchangeResult<Vec<TickerSnapshot>>;

    /// 요청 크기와 관계없이 호가 통화 전체 시세를 한 번에 내려주는지 여부.
    ///
    /// `true`이면 배치 조회가 청크를 나누지 않고 한 번만 요청합니다.
    fn returns_full_market(&self) -> bool {
        false
    }
}

/// 환산 환율 조회.
#[async_trait]
pub trait CrossRateSource: Send + Sync {
    /// `base` 1단위당 `quote` 금액 (예: USDT → KRW).
    async fn fetch_rate(&self, base: &str, quote: &str) -> ExchangeResult<Decimal>;
}
