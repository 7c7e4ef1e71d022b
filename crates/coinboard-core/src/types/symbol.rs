//! 마켓 심볼 정의.
//!
//! 거래소마다 마켓 코드 표기가 다릅니다:
//! - Upbit: `KRW-BTC` (호가 통화가 앞)
//! - Bithumb: `BTC_KRW`
//! - 일반 표기: `BTC/KRW`
//!
//! 내부에서는 모두 `Symbol { base, quote }`로 다루고, 표준 문자열은 Upbit 형식을 따릅니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 거래 가능한 마켓 심볼.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol {
    /// 기준 자산 (예: BTC)
    pub base: String,
    /// 호가 통화 (예: KRW)
    pub quote: String,
}

impl Symbol {
    /// 새 심볼을 생성합니다. 통화 코드는 대문자로 정규화됩니다.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().trim().to_uppercase(),
            quote: quote.into().trim().to_uppercase(),
        }
    }

    /// 마켓 코드를 파싱합니다.
    ///
    /// `KRW-BTC`, `BTC/KRW`, `BTC_KRW` 형식을 지원합니다.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();

        let (base, quote) = if let Some((quote, base)) = code.split_once('-') {
            (base, quote)
        } else if let Some((base, quote)) = code.split_once('/') {
            (base, quote)
        } else if let Some((base, quote)) = code.split_once('_') {
            (base, quote)
        } else {
            return None;
        };

        if base.is_empty() || quote.is_empty() {
            return None;
        }

        Some(Self::new(base, quote))
    }

    /// Upbit 형식 마켓 코드 (`KRW-BTC`).
    pub fn market_code(&self) -> String {
        format!("{}-{}", self.quote, self.base)
    }

    /// 호가 통화를 제거한 표시용 라벨 (`BTC`).
    pub fn label(&self) -> &str {
        &self.base
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.quote, self.base)
    }
}

/// 거래소 마켓 카탈로그의 한 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketInfo {
    /// 마켓 심볼
    pub symbol: Symbol,
    /// 한글명 (Bithumb은 제공하지 않음)
    pub korean_name: Option<String>,
    /// 영문명
    pub english_name: Option<String>,
}

impl MarketInfo {
    /// 이름 정보 없이 생성합니다.
    pub fn unnamed(symbol: Symbol) -> Self {
        Self {
            symbol,
            korean_name: None,
            english_name: None,
        }
    }
}
