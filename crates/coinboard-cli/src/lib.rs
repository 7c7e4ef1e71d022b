//! # Coinboard CLI
//!
//! 콘솔 시세 모니터와 마켓 목록 도구.
//!
//! - `monitor`: 폴링 루프와 고정 주기 스케줄러
//! - `render`: 터미널/로그 렌더러
//! - `commands`: 마켓 목록 내보내기, 코인 집합 비교

pub mod commands;
pub mod monitor;
pub mod render;
pub mod stats;

pub use stats::CycleStats;
