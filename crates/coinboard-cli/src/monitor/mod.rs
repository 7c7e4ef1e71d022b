//! 폴링 모니터.
//!
//! - `scheduler`: 고정 주기 실행과 종료 처리
//! - `market`: 다종목 시세 테이블 (환율 환산)
//! - `usdt`: KRW-USDT 단일 종목 패널
//! - `forex`: 외환 환율 패널

pub mod forex;
pub mod market;
pub mod scheduler;
pub mod usdt;

pub use forex::ForexMonitor;
pub use market::{LoopState, MarketMonitor, MarketSettings};
pub use scheduler::{CycleOutcome, FixedPeriodScheduler, PollCycle};
pub use usdt::UsdtMonitor;
