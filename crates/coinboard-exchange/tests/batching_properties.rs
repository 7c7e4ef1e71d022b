//! 배치 조회 속성 테스트

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use coinboard_core::{Symbol, TickerSnapshot};
use coinboard_exchange::{fetch_in_batches, ExchangeResult, TickerSource};
use proptest::prelude::*;

/// 요청받은 심볼을 그대로 돌려주고 요청 내역을 기록하는 공급자.
#[derive(Default)]
struct EchoSource {
    calls: Mutex<Vec<Vec<Symbol>>>,
}

#[async_trait]
impl TickerSource for EchoSource {
    async fn fetch_tickers(&self, symbols: &[Symbol]) -> ExchangeResult<Vec<TickerSnapshot>> {
        self.calls.lock().unwrap().push(symbols.to_vec());
        Ok(symbols.iter().cloned().map(TickerSnapshot::empty).collect())
    }
}

proptest! {
    #[test]
    fn batches_cover_input_without_duplicates(
        bases in proptest::collection::vec("[A-F]{1,2}", 0..60),
        batch_size in 0usize..15,
    ) {
        let symbols: Vec<Symbol> = bases.iter().map(|b| Symbol::new(b.as_str(), "KRW")).collect();
        let source = EchoSource::default();

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let snapshots = runtime
            .block_on(fetch_in_batches(&source, &symbols, batch_size))
            .unwrap();

        let input: HashSet<&Symbol> = symbols.iter().collect();
        let mut output = HashSet::new();
        for snapshot in &snapshots {
            prop_assert!(input.contains(&snapshot.symbol));
            prop_assert!(output.insert(snapshot.symbol.clone()));
        }
        prop_assert_eq!(output.len(), input.len());

        let calls = source.calls.lock().unwrap();
        let mut requested = HashSet::new();
        for call in calls.iter() {
            prop_assert!(call.len() <= batch_size.max(1));
            for symbol in call {
                prop_assert!(requested.insert(symbol.clone()));
            }
        }
    }
}
