//! 직전 주기 대비 환율 변동률 계산.

use rust_decimal::Decimal;

/// 이전 환율을 들고 다니는 누적기.
///
/// 매 주기 `advance`에 현재 환율을 넣으면 직전 값 대비 변동률(%)을 돌려주고
/// 내부 상태를 현재 값으로 갱신합니다. 현재 값이 없으면 직전 값을 유지합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateDelta {
    previous: Option<Decimal>,
}

impl RateDelta {
    /// 빈 누적기를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 직전 환율.
    pub fn previous(&self) -> Option<Decimal> {
        self.previous
    }

    /// 현재 환율을 반영하고 직전 대비 변동률(%)을 반환합니다.
    pub fn advance(&mut self, current: Option<Decimal>) -> Option<Decimal> {
        let (change, next) = rate_change(self.previous, current);
        self.previous = next;
        change
    }
}

/// 순수 함수 버전: `(이전 값, 현재 값) -> (변동률, 다음 이전 값)`.
pub fn rate_change(
    previous: Option<Decimal>,
    current: Option<Decimal>,
) -> (Option<Decimal>, Option<Decimal>) {
    match (previous, current) {
        (Some(prev), Some(cur)) if !prev.is_zero() => {
            let change = cur
                .checked_sub(prev)
                .and_then(|diff| diff.checked_div(prev))
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
            (change, Some(cur))
        }
        (_, Some(cur)) => (None, Some(cur)),
        (prev, None) => (None, prev),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_first_observation_has_no_change() {
        let mut delta = RateDelta::new();
        assert_eq!(delta.advance(Some(dec!(1380))), None);
        assert_eq!(delta.previous(), Some(dec!(1380)));
    }

    #[test]
    fn test_change_against_previous() {
        let mut delta = RateDelta::new();
        delta.advance(Some(dec!(1000)));
        assert_eq!(delta.advance(Some(dec!(1010))), Some(dec!(1)));
        assert_eq!(delta.advance(Some(dec!(909))), Some(dec!(-10)));
    }

    #[test]
    fn test_missing_rate_keeps_previous() {
        let mut delta = RateDelta::new();
        delta.advance(Some(dec!(1000)));
        assert_eq!(delta.advance(None), None);
        assert_eq!(delta.previous(), Some(dec!(1000)));
        assert_eq!(delta.advance(Some(dec!(1020))), Some(dec!(2)));
    }

    #[test]
    fn test_pure_function() {
        assert_eq!(
            rate_change(Some(dec!(200)), Some(dec!(250))),
            (Some(dec!(25)), Some(dec!(250)))
        );
        assert_eq!(rate_change(Some(dec!(0)), Some(dec!(5))), (None, Some(dec!(5))));
    }

    #[test]
    fn test_overflowing_change_is_none() {
        let tiny = dec!(0.0000000000000000000000000001);
        let (change, next) = rate_change(Some(tiny), Some(Decimal::MAX));
        assert_eq!(change, None);
        assert_eq!(next, Some(Decimal::MAX));
    }
}
