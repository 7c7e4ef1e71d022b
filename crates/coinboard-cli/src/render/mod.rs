//! 화면 렌더링.
//!
//! 모니터는 매 주기 `Frame`을 만들고 `Renderer`에 넘깁니다.
//! 텍스트 생성은 `table` 모듈의 순수 함수가 담당하고
//! 구현체는 출력 대상만 다룹니다.

pub mod log;
pub mod table;
pub mod terminal;

use std::time::Duration;

use chrono::{DateTime, Local};
use coinboard_core::{CrossRate, DisplaySet};

pub use log::LogRenderer;
pub use table::{format_frame, format_table, RowCells};
pub use terminal::TerminalRenderer;

/// 시세 테이블 상단 정보.
#[derive(Debug, Clone)]
pub struct FrameHeader {
    /// 제목 (예: "Upbit KRW markets")
    pub title: String,
    /// 생성 시각
    pub timestamp: DateTime<Local>,
    /// 이번 주기 환율 (없으면 unavailable 표시)
    pub rate: Option<CrossRate>,
    /// 갱신 주기
    pub interval: Duration,
    /// 최대 표시 행 수
    pub display_count: usize,
    /// 호가 통화 (KRW)
    pub quote: String,
    /// 보조 통화 (USDT)
    pub secondary: String,
}

/// 한 번에 그릴 화면.
#[derive(Debug, Clone)]
pub enum Frame {
    /// 다종목 시세 테이블
    Table {
        header: FrameHeader,
        rows: DisplaySet,
    },
    /// 단일 종목/환율 패널
    Panel {
        title: String,
        timestamp: DateTime<Local>,
        lines: Vec<String>,
    },
}

/// 화면 출력 대상.
pub trait Renderer: Send {
    /// 화면 하나를 출력합니다.
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        (**self).render(frame)
    }
}
