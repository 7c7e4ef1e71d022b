//! 다종목 시세 모니터.
//!
//! 시작 시 마켓 카탈로그를 한 번 조회한 뒤, 매 주기
//! 환율 조회 → 배치 시세 조회 → 정규화 → 렌더링을 반복합니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use coinboard_core::{
    normalize, select_quote_markets, DisplaySet, MonitorError, MonitorResult, Symbol,
};
use coinboard_exchange::{
    fetch_cross_rate, fetch_in_batches, CrossRateSource, MarketCatalog, TickerSource,
};
use tracing::{debug, info};

use super::scheduler::{CycleOutcome, FixedPeriodScheduler, PollCycle};
use crate::render::{Frame, FrameHeader, Renderer};
use crate::stats::CycleStats;

/// 모니터 진행 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// 카탈로그 조회 전
    Bootstrapping,
    /// 주기 실행 중
    Cycling,
    /// 종료됨
    Stopped,
}

/// 시세 모니터 설정.
#[derive(Debug, Clone)]
pub struct MarketSettings {
    /// 화면 제목
    pub title: String,
    /// 호가 통화 (KRW)
    pub quote: String,
    /// 환산 대상 통화 (USDT)
    pub secondary: String,
    /// 최대 표시 행 수
    pub display_count: usize,
    /// 요청당 최대 마켓 수
    pub batch_size: usize,
    /// 갱신 주기 (헤더 표시용)
    pub interval: Duration,
}

/// 다종목 시세 모니터.
pub struct MarketMonitor {
    settings: MarketSettings,
    catalog: Box<dyn MarketCatalog>,
    tickers: Box<dyn TickerSource>,
    rates: Box<dyn CrossRateSource>,
    renderer: Box<dyn Renderer>,
    state: LoopState,
    symbols: Vec<Symbol>,
    last_display: DisplaySet,
}

impl MarketMonitor {
    /// 새 모니터 생성.
    pub fn new(
        settings: MarketSettings,
        catalog: Box<dyn MarketCatalog>,
        tickers: Box<dyn TickerSource>,
        rates: Box<dyn CrossRateSource>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        Self {
            settings,
            catalog,
            tickers,
            rates,
            renderer,
            state: LoopState::Bootstrapping,
            symbols: Vec::new(),
            last_display: DisplaySet::default(),
        }
    }

    /// 현재 상태.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// 모니터링 대상 마켓.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// 카탈로그를 조회해 대상 마켓을 확정합니다. 실패는 치명적입니다.
    pub async fn bootstrap(&mut self) -> MonitorResult<usize> {
        let markets = self
            .catalog
            .fetch_markets()
            .await
            .map_err(|e| MonitorError::CatalogUnavailable(e.to_string()))?;

        let symbols =
            select_quote_markets(&markets, &self.settings.quote, &self.settings.secondary);
        if symbols.is_empty() {
            return Err(MonitorError::CatalogUnavailable(format!(
                "{} {} 마켓이 없습니다",
                self.catalog.name(),
                self.settings.quote
            )));
        }

        info!(
            exchange = self.catalog.name(),
            quote = %self.settings.quote,
            markets = symbols.len(),
            "마켓 목록 로드 완료"
        );

        self.symbols = symbols;
        self.state = LoopState::Cycling;
        Ok(self.symbols.len())
    }

    /// 카탈로그를 조회한 뒤 스케줄러가 멈출 때까지 주기를 반복합니다.
    pub async fn run(&mut self, scheduler: &FixedPeriodScheduler) -> MonitorResult<CycleStats> {
        if self.state == LoopState::Bootstrapping {
            if let Err(e) = self.bootstrap().await {
                self.state = LoopState::Stopped;
                return Err(e);
            }
        }

        let result = scheduler.run(self).await;
        self.state = LoopState::Stopped;
        result
    }

    fn header(&self, rate: Option<coinboard_core::CrossRate>) -> FrameHeader {
        FrameHeader {
            title: self.settings.title.clone(),
            timestamp: Local::now(),
            rate,
            interval: self.settings.interval,
            display_count: self.settings.display_count,
            quote: self.settings.quote.clone(),
            secondary: self.settings.secondary.clone(),
        }
    }

    fn draw(&mut self, frame: &Frame) -> MonitorResult<()> {
        self.renderer
            .render(frame)
            .map_err(|e| MonitorError::Io(std::io::Error::other(e)))
    }
}

#[async_trait]
impl PollCycle for MarketMonitor {
    fn name(&self) -> &str {
        &self.settings.title
    }

    async fn run_cycle(&mut self, _cycle: u64) -> MonitorResult<CycleOutcome> {
        let rate = fetch_cross_rate(
            self.rates.as_ref(),
            &self.settings.secondary,
            &self.settings.quote,
        )
        .await;

        let Some(rate) = rate else {
            // 환율이 없으면 직전 종목 목록만 빈 값으로 유지
            let frame = Frame::Table {
                header: self.header(None),
                rows: self.last_display.to_placeholders(),
            };
            self.draw(&frame)?;
            return Ok(CycleOutcome::Skipped);
        };

        let snapshots = fetch_in_batches(
            self.tickers.as_ref(),
            &self.symbols,
            self.settings.batch_size,
        )
        .await?;

        let rows = normalize(&snapshots, Some(&rate), self.settings.display_count);
        debug!(received = snapshots.len(), shown = rows.len(), "정규화 완료");

        self.last_display = rows.clone();
        let frame = Frame::Table {
            header: self.header(Some(rate)),
            rows,
        };
        self.draw(&frame)?;

        Ok(CycleOutcome::Rendered)
    }
}
