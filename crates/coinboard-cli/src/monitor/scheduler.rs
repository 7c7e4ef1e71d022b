//! 고정 주기 스케줄러.
//!
//! `tokio::time::interval`을 `MissedTickBehavior::Delay`로 사용하므로
//! 주기 작업이 `t`만큼 걸리면 다음 시작까지 `max(0, 주기 - t)`만 기다립니다.
//! 진행 중인 요청은 취소하지 않고, 주기 사이에서만 종료 신호를 확인합니다.

use std::time::Duration;

use async_trait::async_trait;
use coinboard_core::{cycle_span, MonitorResult};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn, Instrument};

use crate::stats::CycleStats;

/// 한 주기의 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// 전체 수치를 그림
    Rendered,
    /// 일부 정보가 없어 빈 값으로 그림
    Skipped,
}

/// 스케줄러가 반복 실행하는 작업.
#[async_trait]
pub trait PollCycle: Send {
    /// 로그에 쓸 이름.
    fn name(&self) -> &str;

    /// 한 주기를 실행합니다. 에러는 기록 후 다음 주기로 넘어갑니다.
    async fn run_cycle(&mut self, cycle: u64) -> MonitorResult<CycleOutcome>;
}

/// 고정 주기 실행기.
#[derive(Debug, Clone)]
pub struct FixedPeriodScheduler {
    period: Duration,
    max_cycles: Option<u64>,
    cancel: CancellationToken,
}

impl FixedPeriodScheduler {
    /// 새 스케줄러 생성. 주기가 0이면 1초로 둡니다.
    pub fn new(period: Duration, cancel: CancellationToken) -> Self {
        let period = if period.is_zero() {
            Duration::from_secs(1)
        } else {
            period
        };
        Self {
            period,
            max_cycles: None,
            cancel,
        }
    }

    /// 최대 주기 수를 지정합니다.
    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// 실행 주기.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// 종료 신호를 받거나 최대 주기 수에 도달할 때까지 작업을 반복합니다.
    ///
    /// 치명적 에러(`is_fatal`)만 루프를 끝내고 호출자에게 돌려줍니다.
    pub async fn run<C: PollCycle + ?Sized>(&self, job: &mut C) -> MonitorResult<CycleStats> {
        let started = Instant::now();
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut stats = CycleStats::new();

        loop {
            if self.cancel.is_cancelled() {
                debug!(monitor = job.name(), "종료 신호 확인");
                break;
            }
            if self.max_cycles.is_some_and(|max| stats.cycles >= max) {
                break;
            }

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                _ = interval.tick() => {}
            }

            stats.cycles += 1;
            let span = cycle_span!(job.name(), stats.cycles);

            match job.run_cycle(stats.cycles).instrument(span).await {
                Ok(CycleOutcome::Rendered) => stats.rendered += 1,
                Ok(CycleOutcome::Skipped) => stats.skipped += 1,
                Err(e) if e.is_fatal() => {
                    stats.errors += 1;
                    stats.elapsed = started.elapsed();
                    stats.log_summary(job.name());
                    return Err(e);
                }
                Err(e) => {
                    stats.errors += 1;
                    warn!(monitor = job.name(), cycle = stats.cycles, "주기 실패: {}", e);
                }
            }
        }

        stats.elapsed = started.elapsed();
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinboard_core::MonitorError;

    /// 주기마다 지정한 시간만큼 걸리는 작업.
    struct SleepyJob {
        latency: Duration,
        started_at: Vec<Instant>,
        fail_on: Option<u64>,
    }

    #[async_trait]
    impl PollCycle for SleepyJob {
        fn name(&self) -> &str {
            "sleepy"
        }

        async fn run_cycle(&mut self, cycle: u64) -> MonitorResult<CycleOutcome> {
            self.started_at.push(Instant::now());
            tokio::time::sleep(self.latency).await;
            if self.fail_on == Some(cycle) {
                return Err(MonitorError::RateUnavailable("503".to_string()));
            }
            Ok(CycleOutcome::Rendered)
        }
    }

    fn job(latency_ms: u64) -> SleepyJob {
        SleepyJob {
            latency: Duration::from_millis(latency_ms),
            started_at: Vec::new(),
            fail_on: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_constant_cadence() {
        let period = Duration::from_secs(10);
        let scheduler =
            FixedPeriodScheduler::new(period, CancellationToken::new()).with_max_cycles(Some(5));
        let mut job = job(3_000);

        let stats = scheduler.run(&mut job).await.unwrap();

        assert_eq!(stats.cycles, 5);
        assert_eq!(stats.rendered, 5);
        // 마지막 주기 시작 = 4 * 10s, 작업 3s
        assert_eq!(stats.elapsed, Duration::from_secs(43));
        for pair in job.started_at.windows(2) {
            assert_eq!(pair[1] - pair[0], period);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_cycle_does_not_burst() {
        let period = Duration::from_secs(2);
        let scheduler =
            FixedPeriodScheduler::new(period, CancellationToken::new()).with_max_cycles(Some(3));
        let mut job = job(5_000);

        scheduler.run(&mut job).await.unwrap();

        for pair in job.started_at.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(5));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_error_continues() {
        let scheduler = FixedPeriodScheduler::new(Duration::from_secs(1), CancellationToken::new())
            .with_max_cycles(Some(3));
        let mut job = SleepyJob {
            fail_on: Some(2),
            ..job(10)
        };

        let stats = scheduler.run(&mut job).await.unwrap();
        assert_eq!(stats.cycles, 3);
        assert_eq!(stats.rendered, 2);
        assert_eq!(stats.errors, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_between_cycles() {
        let cancel = CancellationToken::new();
        let scheduler = FixedPeriodScheduler::new(Duration::from_secs(10), cancel.clone());
        let mut job = job(100);

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(25)).await;
            trigger.cancel();
        });

        let stats = scheduler.run(&mut job).await.unwrap();
        assert_eq!(stats.cycles, 3);
    }

    #[tokio::test]
    async fn test_already_cancelled_runs_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let scheduler = FixedPeriodScheduler::new(Duration::from_secs(1), cancel);
        let mut job = job(0);

        let stats = scheduler.run(&mut job).await.unwrap();
        assert_eq!(stats.cycles, 0);
    }
}
