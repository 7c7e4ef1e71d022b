//! 시세 데이터 구조체.
//!
//! - `CrossRate` - 재환산 기준 환율 (예: 1 USDT = 1,350 KRW)
//! - `TickerSnapshot` - 거래소가 반환한 원시 시세
//! - `NormalizedRow` / `DisplaySet` - 화면 표시용으로 정규화된 행

use crate::types::Symbol;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 호가 통화를 보조 통화로 재환산하기 위한 환율.
///
/// `value`는 보조 통화 1단위당 호가 통화 금액입니다 (KRW per USDT).
/// 0 이하의 값으로는 생성할 수 없습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossRate {
    /// 보조 통화 (예: USDT)
    pub base: String,
    /// 호가 통화 (예: KRW)
    pub quote: String,
    value: Decimal,
}

impl CrossRate {
    /// 양수인 경우에만 환율을 생성합니다.
    pub fn new(base: impl Into<String>, quote: impl Into<String>, value: Decimal) -> Option<Self> {
        if value <= Decimal::ZERO {
            return None;
        }
        Some(Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
            value,
        })
    }

    /// 환율 값.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// 호가 통화 금액을 보조 통화로 환산합니다.
    ///
    /// 몫이 `Decimal` 범위를 넘으면 `None`입니다.
    pub fn convert(&self, amount: Decimal) -> Option<Decimal> {
        amount.checked_div(self.value)
    }
}

impl fmt::Display for CrossRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {} {}", self.base, self.value, self.quote)
    }
}

/// 거래소가 반환한 마켓별 원시 시세.
///
/// 모든 수치 필드는 선택적입니다. 응답에 필드가 빠져 있으면
/// 해당 칸만 `N/A`로 표시됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSnapshot {
    /// 마켓 심볼
    pub symbol: Symbol,
    /// 최근 체결가 (호가 통화)
    pub last_price: Option<Decimal>,
    /// 24시간 누적 거래대금 (호가 통화)
    pub volume_quote_24h: Option<Decimal>,
    /// 24시간 누적 거래량 (기준 자산)
    pub volume_base_24h: Option<Decimal>,
    /// 24시간 부호 있는 변동률 (0.021 = +2.1%)
    pub change_ratio_24h: Option<Decimal>,
    /// 24시간 고가
    pub high_24h: Option<Decimal>,
    /// 24시간 저가
    pub low_24h: Option<Decimal>,
    /// 전일 종가
    pub prev_close: Option<Decimal>,
}

impl TickerSnapshot {
    /// 가격 정보가 비어 있는 스냅샷을 생성합니다.
    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            last_price: None,
            volume_quote_24h: None,
            volume_base_24h: None,
            change_ratio_24h: None,
            high_24h: None,
            low_24h: None,
            prev_close: None,
        }
    }

    /// 24시간 변동률을 백분율로 반환합니다.
    pub fn change_percent(&self) -> Option<Decimal> {
        self.change_ratio_24h
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }
}

/// 화면 표시용 정규화 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    /// 호가 통화를 제거한 라벨 (예: BTC)
    pub label: String,
    /// 호가 통화 가격
    pub price_quote: Option<Decimal>,
    /// 보조 통화 가격 (환율 없으면 None)
    pub price_secondary: Option<Decimal>,
    /// 호가 통화 거래대금
    pub volume_quote: Option<Decimal>,
    /// 보조 통화 거래대금 (환율 없으면 None)
    pub volume_secondary: Option<Decimal>,
    /// 24시간 변동률(%)
    pub change_percent: Option<Decimal>,
}

impl NormalizedRow {
    /// 환율 정보 없이 라벨만 가진 행 (이전 화면 유지용).
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            price_quote: None,
            price_secondary: None,
            volume_quote: None,
            volume_secondary: None,
            change_percent: None,
        }
    }
}

/// 거래대금 내림차순으로 정렬되고 표시 개수로 잘린 행 목록.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySet {
    rows: Vec<NormalizedRow>,
}

impl DisplaySet {
    pub(crate) fn from_sorted(rows: Vec<NormalizedRow>) -> Self {
        Self { rows }
    }

    /// 행 목록.
    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    /// 행 수.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 비어 있는지 여부.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 같은 라벨 순서를 유지하되 수치를 모두 비운 사본.
    ///
    /// 환율 조회에 실패한 주기에 직전 화면의 종목 목록만 보여줄 때 사용합니다.
    pub fn to_placeholders(&self) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| NormalizedRow::placeholder(row.label.clone()))
                .collect(),
        }
    }
}
