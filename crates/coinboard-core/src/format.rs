//! 화면 출력용 숫자 포맷팅.
//!
//! 모든 값은 지정 자릿수로 반올림(0.5는 0에서 먼 쪽)한 뒤 천 단위 구분자를 붙입니다.
//! 값이 없으면 `N/A`를 반환합니다.

use rust_decimal::{Decimal, RoundingStrategy};

/// 값이 없을 때 표시하는 문자열.
pub const NOT_AVAILABLE: &str = "N/A";

/// 천 단위 구분자를 포함해 포맷합니다.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use coinboard_core::format::format_grouped;
///
/// assert_eq!(format_grouped(dec!(1234567.891), 2), "1,234,567.89");
/// assert_eq!(format_grouped(dec!(-500.5), 0), "-501");
/// assert_eq!(format_grouped(dec!(999), 1), "999.0");
/// ```
pub fn format_grouped(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let is_negative = rounded.is_sign_negative() && !rounded.is_zero();
    let formatted = format!("{:.prec$}", rounded.abs(), prec = precision as usize);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };

    // 정수부에 천 단위 구분자 추가
    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if is_negative { "-" } else { "" };
    match decimal_part {
        Some(dec) => format!("{}{}.{}", sign, grouped, dec),
        None => format!("{}{}", sign, grouped),
    }
}

/// 선택적 값을 포맷합니다. 없으면 `N/A`.
pub fn format_opt(value: Option<Decimal>, precision: u32) -> String {
    value
        .map(|v| format_grouped(v, precision))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// 호가 통화(KRW) 가격의 표시 자릿수.
///
/// 100 이상은 정수, 1 이상은 소수 2자리, 그 미만은 4자리.
pub fn quote_price_precision(price: Decimal) -> u32 {
    let abs = price.abs();
    if abs >= Decimal::ONE_HUNDRED {
        0
    } else if abs >= Decimal::ONE {
        2
    } else {
        4
    }
}

/// 호가 통화 가격을 자릿수를 골라 포맷합니다.
pub fn format_quote_price(price: Option<Decimal>) -> String {
    match price {
        Some(p) => format_grouped(p, quote_price_precision(p)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// 부호를 항상 붙인 백분율 (`+2.10%`, `-0.35%`).
pub fn format_signed_percent(value: Option<Decimal>, precision: u32) -> String {
    match value {
        Some(v) => {
            let body = format_grouped(v, precision);
            if body.starts_with('-') {
                format!("{}%", body)
            } else {
                format!("+{}%", body)
            }
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

/// 방향 화살표와 절댓값으로 표시한 변동률 (`↑2.1%`, `↓0.4%`).
pub fn format_arrow_percent(value: Option<Decimal>, precision: u32) -> String {
    match value {
        Some(v) => {
            let arrow = if v.is_sign_negative() && !v.is_zero() {
                "↓"
            } else {
                "↑"
            };
            format!("{}{}%", arrow, format_grouped(v.abs(), precision))
        }
        None => NOT_AVAILABLE.to_string(),
    }
}
