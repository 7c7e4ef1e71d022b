//! Upbit 거래소 커넥터.
//!
//! 공개 REST API만 사용합니다.
//! - 마켓 목록: `GET /v1/market/all`
//! - 시세: `GET /v1/ticker?markets=KRW-BTC,KRW-ETH`

use async_trait::async_trait;
use coinboard_core::config::HttpConfig;
use coinboard_core::{MarketInfo, Symbol, TickerSnapshot};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::http::RestClient;
use crate::traits::{CrossRateSource, ExchangeResult, MarketCatalog, TickerSource};
use crate::ExchangeError;

/// Upbit REST API 기본 URL.
pub const UPBIT_BASE_URL: &str = "https://api.upbit.com";

// ============================================================================
// API 응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct UpbitMarket {
    market: String,
    #[serde(default)]
    korean_name: Option<String>,
    #[serde(default)]
    english_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpbitTicker {
    market: String,
    #[serde(default)]
    trade_price: Option<Decimal>,
    #[serde(default)]
    signed_change_rate: Option<Decimal>,
    #[serde(default)]
    acc_trade_price_24h: Option<Decimal>,
    #[serde(default)]
    acc_trade_volume_24h: Option<Decimal>,
    #[serde(default)]
    high_price: Option<Decimal>,
    #[serde(default)]
    low_price: Option<Decimal>,
    #[serde(default)]
    prev_closing_price: Option<Decimal>,
}

impl UpbitTicker {
    fn into_snapshot(self) -> Option<TickerSnapshot> {
        let symbol = Symbol::parse(&self.market)?;
        Some(TickerSnapshot {
            symbol,
            last_price: self.trade_price,
            volume_quote_24h: self.acc_trade_price_24h,
            volume_base_24h: self.acc_trade_volume_24h,
            change_ratio_24h: self.signed_change_rate,
            high_24h: self.high_price,
            low_24h: self.low_price,
            prev_close: self.prev_closing_price,
        })
    }
}

// ============================================================================
// 클라이언트
// ============================================================================

/// Upbit 공개 API 클라이언트.
#[derive(Debug, Clone)]
pub struct UpbitClient {
    rest: RestClient,
}

impl UpbitClient {
    /// 새 클라이언트 생성. `base_url`이 없으면 운영 서버를 사용합니다.
    pub fn new(http: &HttpConfig, base_url: Option<&str>) -> ExchangeResult<Self> {
        Ok(Self {
            rest: RestClient::new(http, base_url.unwrap_or(UPBIT_BASE_URL))?,
        })
    }

    /// 단일 마켓 시세 조회.
    pub async fn fetch_ticker(&self, symbol: &Symbol) -> ExchangeResult<TickerSnapshot> {
        self.fetch_tickers(std::slice::from_ref(symbol))
            .await?
            .into_iter()
            .find(|s| &s.symbol == symbol)
            .ok_or_else(|| ExchangeError::SymbolNotFound(symbol.market_code()))
    }
}

#[async_trait]
impl MarketCatalog for UpbitClient {
    fn name(&self) -> &str {
        "upbit"
    }

    async fn fetch_markets(&self) -> ExchangeResult<Vec<MarketInfo>> {
        let markets: Vec<UpbitMarket> = self.rest.get("/v1/market/all", &[]).await?;

        let infos: Vec<MarketInfo> = markets
            .into_iter()
            .filter_map(|m| {
                let symbol = Symbol::parse(&m.market)?;
                Some(MarketInfo {
                    symbol,
                    korean_name: m.korean_name,
                    english_name: m.english_name,
                })
            })
            .collect();

        debug!(count = infos.len(), "Upbit 마켓 목록 수신");
        Ok(infos)
    }
}

#[async_trait]
impl TickerSource for UpbitClient {
    async fn fetch_tickers(&self, symbols: &[Symbol]) -> ExchangeResult<Vec<TickerSnapshot>> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let markets = symbols
            .iter()
            .map(Symbol::market_code)
            .collect::<Vec<_>>()
            .join(",");

        let tickers: Vec<UpbitTicker> = self.rest.get("/v1/ticker", &[("markets", markets)]).await?;

        Ok(tickers
            .into_iter()
            .filter_map(UpbitTicker::into_snapshot)
            .collect())
    }
}

#[async_trait]
impl CrossRateSource for UpbitClient {
    async fn fetch_rate(&self, base: &str, quote: &str) -> ExchangeResult<Decimal> {
        let symbol = Symbol::new(base, quote);
        self.fetch_ticker(&symbol)
            .await?
            .last_price
            .ok_or_else(|| ExchangeError::ParseError(format!("{} trade_price 없음", symbol)))
    }
}
