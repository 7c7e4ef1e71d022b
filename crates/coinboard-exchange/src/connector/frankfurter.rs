//! Frankfurter 외환 환율 커넥터.
//!
//! `GET /latest?from=USD&to=KRW` → `{"base":"USD","rates":{"KRW":1380.5}}`

use std::collections::HashMap;

use async_trait::async_trait;
use coinboard_core::config::HttpConfig;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::http::RestClient;
use crate::traits::{CrossRateSource, ExchangeResult};
use crate::ExchangeError;

/// Frankfurter API 기본 URL.
pub const FRANKFURTER_BASE_URL: &str = "https://api.frankfurter.app";

#[derive(Debug, Deserialize)]
struct LatestRates {
    #[serde(default)]
    rates: HashMap<String, Decimal>,
}

/// 외환 환율 클라이언트.
#[derive(Debug, Clone)]
pub struct FrankfurterClient {
    rest: RestClient,
}

impl FrankfurterClient {
    /// 새 클라이언트 생성.
    pub fn new(http: &HttpConfig, base_url: Option<&str>) -> ExchangeResult<Self> {
        Ok(Self {
            rest: RestClient::new(http, base_url.unwrap_or(FRANKFURTER_BASE_URL))?,
        })
    }
}

#[async_trait]
impl CrossRateSource for FrankfurterClient {
    async fn fetch_rate(&self, base: &str, quote: &str) -> ExchangeResult<Decimal> {
        let base = base.to_uppercase();
        let quote = quote.to_uppercase();

        let latest: LatestRates = self
            .rest
            .get(
                "/latest",
                &[("from", base.clone()), ("to", quote.clone())],
            )
            .await?;

        latest
            .rates
            .get(&quote)
            .copied()
            .ok_or_else(|| ExchangeError::SymbolNotFound(format!("{}/{}", base, quote)))
    }
}
