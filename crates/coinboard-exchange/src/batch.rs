//! 배치 시세 조회와 환율 조회 헬퍼.

use std::collections::HashSet;

use coinboard_core::{CrossRate, MonitorError, MonitorResult, Symbol, TickerSnapshot};
use tracing::{debug, warn};

use crate::traits::{CrossRateSource, TickerSource};

/// 마켓 목록을 `batch_size` 단위로 나눠 순차 조회합니다.
///
/// - 입력 중복은 첫 등장만 남깁니다.
/// - `batch_size`가 0이면 1로 취급합니다.
/// - 공급자가 전체 시세를 한 번에 내려주면 청크를 나누지 않습니다.
/// - 청크에서 요청하지 않은 심볼이나 이미 받은 심볼은 버립니다.
/// - 한 청크라도 실패하면 전체를 실패로 돌려줍니다. 이번 주기는 건너뛰고
///   다음 주기에 처음부터 다시 조회합니다.
pub async fn fetch_in_batches(
    source: &dyn TickerSource,
    symbols: &[Symbol],
    batch_size: usize,
) -> MonitorResult<Vec<TickerSnapshot>> {
    let mut seen = HashSet::new();
    let unique: Vec<Symbol> = symbols
        .iter()
        .filter(|s| seen.insert((*s).clone()))
        .cloned()
        .collect();

    let batch_size = if source.returns_full_market() {
        unique.len().max(1)
    } else {
        batch_size.max(1)
    };
    let chunks = unique.len().div_ceil(batch_size);
    let mut received: HashSet<Symbol> = HashSet::with_capacity(unique.len());
    let mut snapshots = Vec::with_capacity(unique.len());

    for (index, chunk) in unique.chunks(batch_size).enumerate() {
        let requested: HashSet<&Symbol> = chunk.iter().collect();

        let batch = source
            .fetch_tickers(chunk)
            .await
            .map_err(|e| MonitorError::TickerFetchPartial {
                chunk: index + 1,
                chunks,
                reason: e.to_string(),
            })?;

        debug!(chunk = index + 1, chunks, count = batch.len(), "시세 청크 수신");

        for snapshot in batch {
            if !requested.contains(&snapshot.symbol) {
                continue;
            }
            if received.insert(snapshot.symbol.clone()) {
                snapshots.push(snapshot);
            }
        }
    }

    Ok(snapshots)
}

/// 환율을 조회합니다. 어떤 실패든 경고만 남기고 `None`을 반환합니다.
///
/// 0 이하의 값도 사용할 수 없는 환율로 취급합니다.
pub async fn fetch_cross_rate(
    source: &dyn CrossRateSource,
    base: &str,
    quote: &str,
) -> Option<CrossRate> {
    match source.fetch_rate(base, quote).await {
        Ok(value) => {
            let rate = CrossRate::new(base, quote, value);
            if rate.is_none() {
                let err = MonitorError::RateUnavailable(format!("non-positive rate {}", value));
                warn!(base, quote, "{}", err);
            }
            rate
        }
        Err(e) => {
            let err = MonitorError::RateUnavailable(e.to_string());
            warn!(base, quote, "{}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExchangeError, ExchangeResult};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct FixedRate(ExchangeResult<Decimal>);

    #[async_trait]
    impl CrossRateSource for FixedRate {
        async fn fetch_rate(&self, _base: &str, _quote: &str) -> ExchangeResult<Decimal> {
            match &self.0 {
                Ok(v) => Ok(*v),
                Err(e) => Err(ExchangeError::Unknown(e.to_string())),
            }
        }
    }

    /// 요청을 기록하고, 요청에 없는 심볼과 중복을 섞어 돌려주는 가짜 공급자.
    struct NoisySource {
        calls: Mutex<Vec<Vec<Symbol>>>,
        fail_on_call: Option<usize>,
    }

    #[async_trait]
    impl TickerSource for NoisySource {
        async fn fetch_tickers(&self, symbols: &[Symbol]) -> ExchangeResult<Vec<TickerSnapshot>> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(symbols.to_vec());
            if self.fail_on_call == Some(calls.len()) {
                return Err(ExchangeError::Timeout("5s".to_string()));
            }

            let mut out: Vec<TickerSnapshot> =
                symbols.iter().cloned().map(TickerSnapshot::empty).collect();
            out.push(TickerSnapshot::empty(Symbol::new("NOPE", "KRW")));
            if let Some(first) = symbols.first() {
                out.push(TickerSnapshot::empty(first.clone()));
            }
            Ok(out)
        }
    }

    /// 요청과 무관하게 전체 목록을 돌려주는 가짜 공급자.
    struct FullMarketSource {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl TickerSource for FullMarketSource {
        async fn fetch_tickers(&self, _symbols: &[Symbol]) -> ExchangeResult<Vec<TickerSnapshot>> {
            *self.calls.lock().unwrap() += 1;
            Ok(symbols(&["BTC", "ETH", "XRP", "SOL", "DOGE"])
                .into_iter()
                .map(TickerSnapshot::empty)
                .collect())
        }

        fn returns_full_market(&self) -> bool {
            true
        }
    }

    fn symbols(bases: &[&str]) -> Vec<Symbol> {
        bases.iter().map(|b| Symbol::new(*b, "KRW")).collect()
    }

    #[tokio::test]
    async fn test_chunks_dedup_and_filter() {
        let source = NoisySource {
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
        };
        let input = symbols(&["BTC", "ETH", "BTC", "XRP", "SOL", "DOGE"]);

        let result = fetch_in_batches(&source, &input, 2).await.unwrap();
        let labels: Vec<&str> = result.iter().map(|s| s.symbol.label()).collect();
        assert_eq!(labels, vec!["BTC", "ETH", "XRP", "SOL", "DOGE"]);

        let calls = source.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], symbols(&["BTC", "ETH"]));
        assert_eq!(calls[2], symbols(&["DOGE"]));
    }

    #[tokio::test]
    async fn test_zero_batch_size_is_one() {
        let source = NoisySource {
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
        };
        let result = fetch_in_batches(&source, &symbols(&["BTC", "ETH"]), 0)
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(source.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_any_chunk_failure_aborts() {
        let source = NoisySource {
            calls: Mutex::new(Vec::new()),
            fail_on_call: Some(2),
        };
        let err = fetch_in_batches(&source, &symbols(&["BTC", "ETH", "XRP", "SOL"]), 2)
            .await
            .unwrap_err();

        match err {
            MonitorError::TickerFetchPartial { chunk, chunks, .. } => {
                assert_eq!(chunk, 2);
                assert_eq!(chunks, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_full_market_source_is_requested_once() {
        let source = FullMarketSource {
            calls: Mutex::new(0),
        };
        let result = fetch_in_batches(&source, &symbols(&["XRP", "BTC", "SOL", "ETH"]), 1)
            .await
            .unwrap();

        let labels: Vec<&str> = result.iter().map(|s| s.symbol.label()).collect();
        assert_eq!(labels, vec!["BTC", "ETH", "XRP", "SOL"]);
        assert_eq!(*source.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_request() {
        let source = NoisySource {
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
        };
        let result = fetch_in_batches(&source, &[], 10).await.unwrap();
        assert!(result.is_empty());
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cross_rate_soft_failure() {
        let ok = FixedRate(Ok(dec!(1350)));
        let rate = fetch_cross_rate(&ok, "USDT", "KRW").await.unwrap();
        assert_eq!(rate.value(), dec!(1350));

        let zero = FixedRate(Ok(Decimal::ZERO));
        assert!(fetch_cross_rate(&zero, "USDT", "KRW").await.is_none());

        let failing = FixedRate(Err(ExchangeError::Timeout("5s".to_string())));
        assert!(fetch_cross_rate(&failing, "USDT", "KRW").await.is_none());
    }
}
