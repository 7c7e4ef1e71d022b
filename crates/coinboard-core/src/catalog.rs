//! 마켓 카탈로그 필터링.

use crate::types::{MarketInfo, Symbol};
use std::collections::HashSet;

/// 카탈로그에서 특정 호가 통화 마켓만 골라냅니다.
///
/// `secondary` 통화 자체의 마켓(예: `KRW-USDT`)은 1:1 환산이 되므로 제외합니다.
/// 중복은 제거하고 카탈로그 순서는 유지합니다.
pub fn select_quote_markets(markets: &[MarketInfo], quote: &str, secondary: &str) -> Vec<Symbol> {
    let quote = quote.to_uppercase();
    let secondary = secondary.to_uppercase();
    let mut seen = HashSet::new();

    markets
        .iter()
        .map(|m| &m.symbol)
        .filter(|s| s.quote == quote && s.base != secondary)
        .filter(|s| seen.insert((*s).clone()))
        .cloned()
        .collect()
}
