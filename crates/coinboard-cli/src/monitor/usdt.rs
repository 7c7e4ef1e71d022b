//! KRW-USDT 단일 종목 모니터.

use async_trait::async_trait;
use chrono::Local;
use coinboard_core::format::{format_arrow_percent, format_opt};
use coinboard_core::{MonitorError, MonitorResult, Symbol, TickerSnapshot};
use coinboard_exchange::TickerSource;

use super::scheduler::{CycleOutcome, PollCycle};
use crate::render::{Frame, Renderer};

/// 단일 마켓 상세 패널 모니터.
pub struct UsdtMonitor {
    symbol: Symbol,
    title: String,
    source: Box<dyn TickerSource>,
    renderer: Box<dyn Renderer>,
}

impl UsdtMonitor {
    /// `symbol` 마켓을 추적하는 모니터 생성 (기본 KRW-USDT).
    pub fn new(symbol: Symbol, source: Box<dyn TickerSource>, renderer: Box<dyn Renderer>) -> Self {
        Self {
            title: format!("Upbit {}", symbol.market_code()),
            symbol,
            source,
            renderer,
        }
    }
}

/// 패널 본문. 현재가가 없으면 `None`.
pub fn usdt_panel_lines(snapshot: &TickerSnapshot) -> Option<Vec<String>> {
    let price = snapshot.last_price?;
    let quote = &snapshot.symbol.quote;

    Some(vec![
        format!("현재가: {} {}", format_opt(Some(price), 1), quote),
        format!(
            "24h 변동: {}",
            format_arrow_percent(snapshot.change_percent(), 1)
        ),
        format!("24h 고가: {} {}", format_opt(snapshot.high_24h, 1), quote),
        format!("24h 저가: {} {}", format_opt(snapshot.low_24h, 1), quote),
        format!(
            "24h 거래량: {} {}",
            format_opt(snapshot.volume_base_24h, 1),
            snapshot.symbol.base
        ),
    ])
}

#[async_trait]
impl PollCycle for UsdtMonitor {
    fn name(&self) -> &str {
        &self.title
    }

    async fn run_cycle(&mut self, _cycle: u64) -> MonitorResult<CycleOutcome> {
        let snapshots = self
            .source
            .fetch_tickers(std::slice::from_ref(&self.symbol))
            .await
            .map_err(|e| MonitorError::RateUnavailable(e.to_string()))?;

        let snapshot = snapshots
            .into_iter()
            .find(|s| s.symbol == self.symbol)
            .ok_or_else(|| {
                MonitorError::MalformedResponse(format!("{} 시세 없음", self.symbol))
            })?;

        let lines = usdt_panel_lines(&snapshot).ok_or_else(|| {
            MonitorError::MalformedResponse(format!("{} 현재가 없음", self.symbol))
        })?;

        let frame = Frame::Panel {
            title: self.title.clone(),
            timestamp: Local::now(),
            lines,
        };
        self.renderer
            .render(&frame)
            .map_err(|e| MonitorError::Io(std::io::Error::other(e)))?;

        Ok(CycleOutcome::Rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_panel_lines() {
        let mut snapshot = TickerSnapshot::empty(Symbol::new("USDT", "KRW"));
        snapshot.last_price = Some(dec!(1350));
        snapshot.change_ratio_24h = Some(dec!(-0.0036));
        snapshot.high_24h = Some(dec!(1362.5));
        snapshot.low_24h = None;
        snapshot.volume_base_24h = Some(dec!(12345678.91));

        let lines = usdt_panel_lines(&snapshot).unwrap();
        assert_eq!(lines[0], "현재가: 1,350.0 KRW");
        assert_eq!(lines[1], "24h 변동: ↓0.4%");
        assert_eq!(lines[2], "24h 고가: 1,362.5 KRW");
        assert_eq!(lines[3], "24h 저가: N/A KRW");
        assert_eq!(lines[4], "24h 거래량: 12,345,678.9 USDT");
    }

    #[test]
    fn test_missing_price() {
        let snapshot = TickerSnapshot::empty(Symbol::new("USDT", "KRW"));
        assert!(usdt_panel_lines(&snapshot).is_none());
    }
}
