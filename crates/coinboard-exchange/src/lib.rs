//! 거래소 공개 REST API 연결.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 공급자 trait: 마켓 카탈로그, 시세, 환율
//! - Upbit, Bithumb, Frankfurter(외환) 커넥터
//! - 배치 시세 조회와 환율 조회 헬퍼

pub mod batch;
pub mod connector;
pub mod error;
pub mod traits;

pub use batch::{fetch_cross_rate, fetch_in_batches};
pub use connector::{BithumbClient, FrankfurterClient, UpbitClient};
pub use error::*;
pub use traits::*;
