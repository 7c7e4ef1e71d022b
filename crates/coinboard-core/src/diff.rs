//! 두 마켓 목록의 코인 집합 비교.
//!
//! 거래소 간(Upbit vs Bithumb) 또는 같은 거래소의 호가 통화 간(KRW vs USDT)
//! 상장 코인을 교집합/왼쪽 전용/오른쪽 전용으로 나눕니다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 비교 대상 코인 한 건.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRecord {
    /// 호가 통화를 제거한 코인 코드 (예: BTC)
    pub coin: String,
    /// 한글명
    #[serde(default)]
    pub korean_name: Option<String>,
    /// 영문명
    #[serde(default)]
    pub english_name: Option<String>,
}

impl CoinRecord {
    /// 마켓 코드(`KRW-BTC`, `USDT-BTC`)에서 코인 레코드를 만듭니다.
    ///
    /// 구분자가 없으면 코드 전체를 코인으로 봅니다.
    pub fn from_market(
        market: &str,
        korean_name: Option<String>,
        english_name: Option<String>,
    ) -> Self {
        let market = market.trim();
        let coin = market
            .split_once('-')
            .map(|(_, coin)| coin)
            .unwrap_or(market)
            .to_uppercase();

        Self {
            coin,
            korean_name: korean_name.filter(|s| !s.is_empty()),
            english_name: english_name.filter(|s| !s.is_empty()),
        }
    }
}

/// 코인 집합 비교 결과. 각 목록은 코인 코드 오름차순입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinSetDiff {
    /// 양쪽 모두 상장 (이름은 왼쪽 기준)
    pub both: Vec<CoinRecord>,
    /// 왼쪽에만 상장
    pub left_only: Vec<CoinRecord>,
    /// 오른쪽에만 상장
    pub right_only: Vec<CoinRecord>,
}

/// 두 코인 목록을 비교합니다. 같은 코인이 여러 번 나오면 처음 것을 씁니다.
pub fn diff_coin_sets(left: &[CoinRecord], right: &[CoinRecord]) -> CoinSetDiff {
    let left = index_by_coin(left);
    let right = index_by_coin(right);

    let mut diff = CoinSetDiff::default();

    for (coin, record) in &left {
        if right.contains_key(coin) {
            diff.both.push((*record).clone());
        } else {
            diff.left_only.push((*record).clone());
        }
    }

    diff.right_only = right
        .iter()
        .filter(|(coin, _)| !left.contains_key(*coin))
        .map(|(_, record)| (*record).clone())
        .collect();

    diff
}

fn index_by_coin(records: &[CoinRecord]) -> BTreeMap<&str, &CoinRecord> {
    let mut index = BTreeMap::new();
    for record in records {
        index.entry(record.coin.as_str()).or_insert(record);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(codes: &[&str]) -> Vec<CoinRecord> {
        codes
            .iter()
            .map(|code| CoinRecord::from_market(code, None, None))
            .collect()
    }

    #[test]
    fn test_from_market_strips_prefix() {
        let record = CoinRecord::from_market(
            "KRW-BTC",
            Some("비트코인".to_string()),
            Some(String::new()),
        );
        assert_eq!(record.coin, "BTC");
        assert_eq!(record.korean_name.as_deref(), Some("비트코인"));
        assert_eq!(record.english_name, None);

        assert_eq!(CoinRecord::from_market("USDT-ETH", None, None).coin, "ETH");
        assert_eq!(CoinRecord::from_market("sol", None, None).coin, "SOL");
    }

    #[test]
    fn test_diff_partitions() {
        let left = coins(&["KRW-BTC", "KRW-ETH", "KRW-XRP", "KRW-BTC"]);
        let right = coins(&["USDT-ETH", "USDT-DOGE", "USDT-BTC"]);

        let diff = diff_coin_sets(&left, &right);
        let names = |list: &[CoinRecord]| list.iter().map(|r| r.coin.clone()).collect::<Vec<_>>();

        assert_eq!(names(&diff.both), vec!["BTC", "ETH"]);
        assert_eq!(names(&diff.left_only), vec!["XRP"]);
        assert_eq!(names(&diff.right_only), vec!["DOGE"]);
    }

    #[test]
    fn test_both_uses_left_names() {
        let left = vec![CoinRecord::from_market(
            "KRW-BTC",
            Some("비트코인".into()),
            Some("Bitcoin".into()),
        )];
        let right = coins(&["KRW-BTC"]);

        let diff = diff_coin_sets(&left, &right);
        assert_eq!(diff.both[0].english_name.as_deref(), Some("Bitcoin"));
    }
}
