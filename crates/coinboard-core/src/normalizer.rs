//! 시세 정규화.
//!
//! 거래소 원시 시세를 보조 통화(USDT) 기준 표시 행으로 변환하고
//! 거래대금 내림차순으로 정렬한 뒤 표시 개수만큼 자릅니다.

use crate::types::{CrossRate, DisplaySet, NormalizedRow, TickerSnapshot};
use std::cmp::Ordering;

/// 시세 목록을 표시용 행 집합으로 정규화합니다.
///
/// - 환율이 없으면 보조 통화 가격/거래대금은 `None`이 되고 나눗셈을 하지 않습니다.
///   환산 결과가 범위를 넘는 칸도 `None`입니다.
/// - 변동률은 거래소 원본 필드에서만 계산되며 환율과 무관합니다.
/// - 정렬 키는 호가 통화 거래대금입니다. 양수 환율로 나눈 값과 순서가 같으므로
///   환율이 없을 때도 같은 순서를 유지합니다. 거래대금이 없는 행은 뒤로 갑니다.
/// - 정렬은 안정 정렬이라 동률인 행은 입력 순서를 유지합니다.
pub fn normalize(
    snapshots: &[TickerSnapshot],
    rate: Option<&CrossRate>,
    max_display: usize,
) -> DisplaySet {
    let mut rows: Vec<NormalizedRow> = snapshots
        .iter()
        .map(|snapshot| normalize_one(snapshot, rate))
        .collect();

    rows.sort_by(|a, b| compare_volume_desc(a, b));
    rows.truncate(max_display);

    DisplaySet::from_sorted(rows)
}

fn normalize_one(snapshot: &TickerSnapshot, rate: Option<&CrossRate>) -> NormalizedRow {
    let price_quote = snapshot.last_price;
    let volume_quote = snapshot.volume_quote_24h;

    NormalizedRow {
        label: snapshot.symbol.label().to_string(),
        price_quote,
        price_secondary: rate.and_then(|r| price_quote.and_then(|p| r.convert(p))),
        volume_quote,
        volume_secondary: rate.and_then(|r| volume_quote.and_then(|v| r.convert(v))),
        change_percent: snapshot.change_percent(),
    }
}

fn compare_volume_desc(a: &NormalizedRow, b: &NormalizedRow) -> Ordering {
    match (a.volume_quote, b.volume_quote) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
