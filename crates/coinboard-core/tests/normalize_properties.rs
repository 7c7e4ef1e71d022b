//! 정규화 속성 테스트
//!
//! 임의의 시세 목록에 대해 정렬, 개수 제한, 환율 미사용 조건을 확인합니다.

use coinboard_core::{normalize, CrossRate, Symbol, TickerSnapshot};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn snapshot_strategy() -> impl Strategy<Value = TickerSnapshot> {
    (
        "[A-Z]{2,5}",
        proptest::option::of(1u64..1_000_000_000),
        proptest::option::of(0u64..10_000_000_000_000),
        proptest::option::of(-3000i64..3000),
    )
        .prop_map(|(base, price, volume, change_bp)| {
            let mut snapshot = TickerSnapshot::empty(Symbol::new(base, "KRW"));
            snapshot.last_price = price.map(Decimal::from);
            snapshot.volume_quote_24h = volume.map(Decimal::from);
            snapshot.change_ratio_24h = change_bp.map(|bp| Decimal::new(bp, 4));
            snapshot
        })
}

proptest! {
    #[test]
    fn rows_are_sorted_by_volume_desc(
        snapshots in proptest::collection::vec(snapshot_strategy(), 0..40),
        rate in 1u64..5000,
        max_display in 0usize..50,
    ) {
        let rate = CrossRate::new("USDT", "KRW", Decimal::from(rate)).unwrap();
        let set = normalize(&snapshots, Some(&rate), max_display);

        prop_assert!(set.len() <= max_display);
        prop_assert!(set.len() <= snapshots.len());

        for pair in set.rows().windows(2) {
            match (pair[0].volume_secondary, pair[1].volume_secondary) {
                (Some(a), Some(b)) => prop_assert!(a >= b),
                (None, Some(_)) => prop_assert!(false, "missing volume sorted before present"),
                _ => {}
            }
        }
    }

    #[test]
    fn missing_rate_never_fills_secondary(
        snapshots in proptest::collection::vec(snapshot_strategy(), 0..40),
        max_display in 0usize..50,
    ) {
        let set = normalize(&snapshots, None, max_display);

        for row in set.rows() {
            prop_assert!(row.price_secondary.is_none());
            prop_assert!(row.volume_secondary.is_none());
        }
    }

    #[test]
    fn change_percent_ignores_rate(
        snapshots in proptest::collection::vec(snapshot_strategy(), 1..20),
        rate in 1u64..5000,
    ) {
        let rate = CrossRate::new("USDT", "KRW", Decimal::from(rate)).unwrap();
        let with_rate = normalize(&snapshots, Some(&rate), snapshots.len());
        let without_rate = normalize(&snapshots, None, snapshots.len());

        let with: Vec<_> = with_rate.rows().iter().map(|r| (&r.label, r.change_percent)).collect();
        let without: Vec<_> = without_rate.rows().iter().map(|r| (&r.label, r.change_percent)).collect();
        prop_assert_eq!(with, without);
    }

    #[test]
    fn any_positive_rate_normalizes_without_panic(
        snapshots in proptest::collection::vec(snapshot_strategy(), 0..20),
        mantissa in 1i64..1_000_000,
        scale in 0u32..28,
    ) {
        let rate = CrossRate::new("USDT", "KRW", Decimal::new(mantissa, scale)).unwrap();
        let set = normalize(&snapshots, Some(&rate), snapshots.len());

        prop_assert_eq!(set.len(), snapshots.len());
        for row in set.rows() {
            if row.volume_quote.is_none() {
                prop_assert!(row.volume_secondary.is_none());
            }
        }
    }
}
