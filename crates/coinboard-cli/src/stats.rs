//! 폴링 주기 통계.

use std::time::Duration;

/// 모니터 실행 통계
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// 실행한 주기 수
    pub cycles: u64,
    /// 시세 테이블을 그린 주기 수
    pub rendered: u64,
    /// 환율이 없어 수치 없이 그린 주기 수
    pub skipped: u64,
    /// 에러로 끝난 주기 수
    pub errors: u64,
    /// 소요 시간
    pub elapsed: Duration,
}

impl CycleStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 정상 렌더링 비율 (%)
    pub fn render_rate(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            (self.rendered as f64 / self.cycles as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, monitor: &str) {
        tracing::info!(
            monitor = monitor,
            cycles = self.cycles,
            rendered = self.rendered,
            skipped = self.skipped,
            errors = self.errors,
            render_rate = format!("{:.1}%", self.render_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "모니터 종료"
        );
    }
}
