//! CLI 명령어 구현 모듈.

pub mod diff;
pub mod export_markets;

use std::fmt;

/// 지원 거래소.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Venue {
    /// Upbit
    Upbit,
    /// Bithumb
    Bithumb,
}

impl Venue {
    /// 파일명/로그용 소문자 이름.
    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::Upbit => "upbit",
            Venue::Bithumb => "bithumb",
        }
    }

    /// 화면 제목용 이름.
    pub fn display_name(&self) -> &'static str {
        match self {
            Venue::Upbit => "Upbit",
            Venue::Bithumb => "Bithumb",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
