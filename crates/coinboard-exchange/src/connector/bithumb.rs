//! Bithumb 거래소 커넥터.
//!
//! `GET /public/ticker/ALL_{QUOTE}` 한 번으로 전체 마켓 시세를 받습니다.
//! 응답의 `data`는 통화 코드별 객체이며 `date` 키만 타임스탬프 문자열입니다.
//! 숫자는 모두 문자열로 옵니다.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use coinboard_core::config::HttpConfig;
use coinboard_core::{MarketInfo, Symbol, TickerSnapshot};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::http::RestClient;
use crate::traits::{CrossRateSource, ExchangeResult, MarketCatalog, TickerSource};
use crate::ExchangeError;

/// Bithumb REST API 기본 URL.
pub const BITHUMB_BASE_URL: &str = "https://api.bithumb.com";

/// 정상 응답 상태 코드.
const STATUS_OK: &str = "0000";

// ============================================================================
// API 응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct BithumbResponse<T> {
    status: String,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct BithumbTicker {
    #[serde(default)]
    closing_price: Option<Decimal>,
    #[serde(default, rename = "acc_trade_value_24H")]
    acc_trade_value_24h: Option<Decimal>,
    #[serde(default, rename = "units_traded_24H")]
    units_traded_24h: Option<Decimal>,
    /// 백분율 (2.1 = +2.1%)
    #[serde(default, rename = "fluctate_rate_24H")]
    fluctate_rate_24h: Option<Decimal>,
    #[serde(default)]
    max_price: Option<Decimal>,
    #[serde(default)]
    min_price: Option<Decimal>,
    #[serde(default)]
    prev_closing_price: Option<Decimal>,
}

impl BithumbTicker {
    fn into_snapshot(self, symbol: Symbol) -> TickerSnapshot {
        TickerSnapshot {
            symbol,
            last_price: self.closing_price,
            volume_quote_24h: self.acc_trade_value_24h,
            volume_base_24h: self.units_traded_24h,
            change_ratio_24h: self.fluctate_rate_24h.map(|p| p / Decimal::ONE_HUNDRED),
            high_24h: self.max_price,
            low_24h: self.min_price,
            prev_close: self.prev_closing_price,
        }
    }
}

fn unwrap_data<T>(response: BithumbResponse<T>) -> ExchangeResult<T> {
    if response.status != STATUS_OK {
        return Err(ExchangeError::ApiError {
            code: response.status.parse().unwrap_or(-1),
            message: response.message.unwrap_or_default(),
        });
    }
    response
        .data
        .ok_or_else(|| ExchangeError::ParseError("data 필드 없음".to_string()))
}

// ============================================================================
// 클라이언트
// ============================================================================

/// Bithumb 공개 API 클라이언트.
#[derive(Debug, Clone)]
pub struct BithumbClient {
    rest: RestClient,
    quote: String,
}

impl BithumbClient {
    /// 새 클라이언트 생성. 카탈로그는 KRW 마켓 기준입니다.
    pub fn new(http: &HttpConfig, base_url: Option<&str>) -> ExchangeResult<Self> {
        Ok(Self {
            rest: RestClient::new(http, base_url.unwrap_or(BITHUMB_BASE_URL))?,
            quote: "KRW".to_string(),
        })
    }

    /// 카탈로그 호가 통화를 변경합니다.
    pub fn with_quote(mut self, quote: &str) -> Self {
        self.quote = quote.to_uppercase();
        self
    }

    /// `ALL_{quote}` 전체 시세 조회. 파싱할 수 없는 항목은 건너뜁니다.
    async fn fetch_all(&self, quote: &str) -> ExchangeResult<Vec<TickerSnapshot>> {
        let path = format!("/public/ticker/ALL_{}", quote);
        let response: BithumbResponse<HashMap<String, Value>> = self.rest.get(&path, &[]).await?;
        let data = unwrap_data(response)?;

        let mut snapshots = Vec::with_capacity(data.len());
        for (currency, value) in data {
            if currency == "date" {
                continue;
            }
            match serde_json::from_value::<BithumbTicker>(value) {
                Ok(ticker) => snapshots.push(ticker.into_snapshot(Symbol::new(currency, quote))),
                Err(e) => warn!(currency = %currency, error = %e, "Bithumb 시세 항목 파싱 실패"),
            }
        }

        // HashMap 순서를 고정
        snapshots.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(snapshots)
    }
}

#[async_trait]
impl MarketCatalog for BithumbClient {
    fn name(&self) -> &str {
        "bithumb"
    }

    async fn fetch_markets(&self) -> ExchangeResult<Vec<MarketInfo>> {
        let markets: Vec<MarketInfo> = self
            .fetch_all(&self.quote)
            .await?
            .into_iter()
            .map(|s| MarketInfo::unnamed(s.symbol))
            .collect();

        debug!(count = markets.len(), "Bithumb 마켓 목록 수신");
        Ok(markets)
    }
}

#[async_trait]
impl TickerSource for BithumbClient {
    /// 호가 통화마다 `ALL_{quote}`를 한 번씩 받아 요청한 마켓만 남깁니다.
    async fn fetch_tickers(&self, symbols: &[Symbol]) -> ExchangeResult<Vec<TickerSnapshot>> {
        let quotes: BTreeSet<&str> = symbols.iter().map(|s| s.quote.as_str()).collect();

        let mut out = Vec::with_capacity(symbols.len());
        for quote in quotes {
            let all = self.fetch_all(quote).await?;
            out.extend(all.into_iter().filter(|s| symbols.contains(&s.symbol)));
        }
        Ok(out)
    }

    fn returns_full_market(&self) -> bool {
        true
    }
}

#[async_trait]
impl CrossRateSource for BithumbClient {
    async fn fetch_rate(&self, base: &str, quote: &str) -> ExchangeResult<Decimal> {
        let path = format!("/public/ticker/{}_{}", base.to_uppercase(), quote.to_uppercase());
        let response: BithumbResponse<BithumbTicker> = self.rest.get(&path, &[]).await?;

        unwrap_data(response)?
            .closing_price
            .ok_or_else(|| ExchangeError::ParseError("closing_price 없음".to_string()))
    }
}
