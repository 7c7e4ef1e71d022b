//! 외환 환율 모니터.
//!
//! 매 주기 환율을 조회해 직전 주기 대비 변동률과 함께 표시합니다.

use async_trait::async_trait;
use chrono::Local;
use coinboard_core::format::{format_arrow_percent, format_grouped};
use coinboard_core::{MonitorError, MonitorResult, RateDelta};
use coinboard_exchange::CrossRateSource;
use rust_decimal::Decimal;
use tracing::warn;

use super::scheduler::{CycleOutcome, PollCycle};
use crate::render::{Frame, Renderer};

/// 외환 환율 패널 모니터.
pub struct ForexMonitor {
    base: String,
    quote: String,
    title: String,
    source: Box<dyn CrossRateSource>,
    renderer: Box<dyn Renderer>,
    delta: RateDelta,
}

impl ForexMonitor {
    /// 새 모니터 생성 (예: USD → KRW).
    pub fn new(
        base: &str,
        quote: &str,
        source: Box<dyn CrossRateSource>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        let base = base.to_uppercase();
        let quote = quote.to_uppercase();
        Self {
            title: format!("{}-{} 환율", quote, base),
            base,
            quote,
            source,
            renderer,
            delta: RateDelta::new(),
        }
    }

    /// 직전 주기 환율.
    pub fn previous_rate(&self) -> Option<Decimal> {
        self.delta.previous()
    }
}

/// 패널 본문.
pub fn forex_panel_lines(
    base: &str,
    quote: &str,
    rate: Option<Decimal>,
    change: Option<Decimal>,
) -> Vec<String> {
    let Some(rate) = rate else {
        return vec!["환율 데이터를 가져올 수 없습니다".to_string()];
    };

    let mut lines = vec![format!(
        "1 {} = {} {}",
        base,
        format_grouped(rate, 1),
        quote
    )];
    if change.is_some() {
        lines.push(format!("직전 대비: {}", format_arrow_percent(change, 2)));
    }
    lines
}

#[async_trait]
impl PollCycle for ForexMonitor {
    fn name(&self) -> &str {
        &self.title
    }

    async fn run_cycle(&mut self, _cycle: u64) -> MonitorResult<CycleOutcome> {
        let current = match self.source.fetch_rate(&self.base, &self.quote).await {
            Ok(value) if value > Decimal::ZERO => Some(value),
            Ok(value) => {
                warn!(base = %self.base, quote = %self.quote, %value, "비정상 환율 무시");
                None
            }
            Err(e) => {
                warn!(base = %self.base, quote = %self.quote, "환율 조회 실패: {}", e);
                None
            }
        };

        let change = self.delta.advance(current);
        let frame = Frame::Panel {
            title: self.title.clone(),
            timestamp: Local::now(),
            lines: forex_panel_lines(&self.base, &self.quote, current, change),
        };
        self.renderer
            .render(&frame)
            .map_err(|e| MonitorError::Io(std::io::Error::other(e)))?;

        Ok(if current.is_some() {
            CycleOutcome::Rendered
        } else {
            CycleOutcome::Skipped
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_first_cycle_has_no_change_line() {
        let lines = forex_panel_lines("USD", "KRW", Some(dec!(1380.55)), None);
        assert_eq!(lines, vec!["1 USD = 1,380.6 KRW"]);
    }

    #[test]
    fn test_change_line() {
        let lines = forex_panel_lines("USD", "KRW", Some(dec!(1380)), Some(dec!(-0.125)));
        assert_eq!(lines[1], "직전 대비: ↓0.13%");
    }

    #[test]
    fn test_unavailable() {
        let lines = forex_panel_lines("USD", "KRW", None, None);
        assert_eq!(lines.len(), 1);
    }
}
