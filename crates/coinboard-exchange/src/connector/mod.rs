//! 거래소 커넥터.

pub mod bithumb;
pub mod frankfurter;
pub mod http;
pub mod upbit;

pub use bithumb::{BithumbClient, BITHUMB_BASE_URL};
pub use frankfurter::{FrankfurterClient, FRANKFURTER_BASE_URL};
pub use upbit::{UpbitClient, UPBIT_BASE_URL};
