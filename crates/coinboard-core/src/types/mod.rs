//! 공통 타입 정의.

pub mod market_data;
pub mod symbol;

pub use market_data::*;
pub use symbol::*;
