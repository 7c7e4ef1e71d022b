//! 암호화폐 시세 모니터 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # Upbit KRW 마켓 거래대금 상위 15개 (USDT 환산, 10초 주기)
//! coinboard monitor
//!
//! # Upbit 전체 KRW 마켓 상위 100개, 60초 주기
//! coinboard monitor --interval 60 --display-count 100
//!
//! # Bithumb KRW 마켓
//! coinboard monitor --venue bithumb
//!
//! # KRW-USDT 시세, USD/KRW 환율
//! coinboard usdt
//! coinboard forex
//!
//! # 마켓 목록 저장 후 비교
//! coinboard export-markets --venue upbit --quote KRW
//! coinboard export-markets --venue bithumb --quote KRW
//! coinboard diff output/upbit_krw_pairs_*.csv output/bithumb_krw_pairs_*.csv \
//!     --left-label upbit --right-label bithumb
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use coinboard_cli::commands::diff::{diff_markets, DiffRequest};
use coinboard_cli::commands::export_markets::export_markets;
use coinboard_cli::commands::Venue;
use coinboard_cli::monitor::{
    FixedPeriodScheduler, ForexMonitor, MarketMonitor, MarketSettings, UsdtMonitor,
};
use coinboard_cli::render::{LogRenderer, Renderer, TerminalRenderer};
use coinboard_cli::CycleStats;
use coinboard_core::{init_logging, AppConfig, LogConfig, LogFormat, MonitorResult, Symbol};
use coinboard_exchange::{
    BithumbClient, CrossRateSource, FrankfurterClient, MarketCatalog, TickerSource, UpbitClient,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "coinboard")]
#[command(about = "Upbit/Bithumb 시세 모니터 - KRW 시세를 USDT로 환산해 표시", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 경로 (기본: config/coinboard.toml, 없으면 기본값)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// 거래대금 상위 마켓 시세 (USDT 환산)
    Monitor {
        /// 거래소
        #[arg(long, value_enum, default_value_t = Venue::Upbit)]
        venue: Venue,

        /// 갱신 주기 (초)
        #[arg(short, long)]
        interval: Option<u64>,

        /// 표시할 최대 행 수
        #[arg(short = 'n', long)]
        display_count: Option<usize>,

        /// 요청당 최대 마켓 수
        #[arg(long)]
        batch_size: Option<usize>,

        /// 지정한 횟수만큼 갱신 후 종료
        #[arg(long)]
        cycles: Option<u64>,

        /// 출력 방식
        #[arg(long, value_enum, default_value_t = RenderMode::Terminal)]
        render: RenderMode,
    },

    /// Upbit KRW-USDT 시세 패널
    Usdt {
        /// 갱신 주기 (초)
        #[arg(short, long)]
        interval: Option<u64>,

        /// 지정한 횟수만큼 갱신 후 종료
        #[arg(long)]
        cycles: Option<u64>,

        /// 출력 방식
        #[arg(long, value_enum, default_value_t = RenderMode::Terminal)]
        render: RenderMode,
    },

    /// 외환 환율 패널 (기본 USD → KRW)
    Forex {
        /// 기준 통화
        #[arg(long)]
        base: Option<String>,

        /// 표시 통화
        #[arg(long)]
        quote: Option<String>,

        /// 갱신 주기 (초)
        #[arg(short, long)]
        interval: Option<u64>,

        /// 지정한 횟수만큼 갱신 후 종료
        #[arg(long)]
        cycles: Option<u64>,

        /// 출력 방식
        #[arg(long, value_enum, default_value_t = RenderMode::Terminal)]
        render: RenderMode,
    },

    /// 거래소 마켓 목록을 CSV로 저장
    ExportMarkets {
        /// 거래소
        #[arg(long, value_enum, default_value_t = Venue::Upbit)]
        venue: Venue,

        /// 호가 통화 (KRW, USDT, BTC)
        #[arg(long, default_value = "KRW")]
        quote: String,

        /// 출력 디렉토리
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// 두 마켓 목록 CSV의 코인 비교
    Diff {
        /// 왼쪽 CSV
        left: PathBuf,

        /// 오른쪽 CSV
        right: PathBuf,

        /// 왼쪽 이름
        #[arg(long, default_value = "left")]
        left_label: String,

        /// 오른쪽 이름
        #[arg(long, default_value = "right")]
        right_label: String,

        /// 출력 디렉토리
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 출력 파일 접두사
        #[arg(long, default_value = "comparison")]
        prefix: String,
    },
}

/// 출력 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RenderMode {
    /// 터미널이면 화면을 지우고 다시 그림
    Terminal,
    /// 이어서 출력
    Plain,
    /// tracing 로그 이벤트
    Log,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Compact => LogFormat::Compact,
        }
    }
}

fn make_renderer(mode: RenderMode) -> Box<dyn Renderer> {
    match mode {
        RenderMode::Terminal => Box::new(TerminalRenderer::new()),
        RenderMode::Plain => Box::new(TerminalRenderer::plain()),
        RenderMode::Log => Box::new(LogRenderer::new()),
    }
}

/// Ctrl+C를 받으면 토큰만 취소합니다. 진행 중인 주기는 끝까지 실행됩니다.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("종료 신호 수신, 현재 주기 완료 후 종료합니다");
            cancel.cancel();
        }
    });
}

/// 모니터 종료 처리: 통계 로그와 종료 메시지.
fn finish_monitor(
    name: &str,
    result: MonitorResult<CycleStats>,
    cancel: &CancellationToken,
) -> Result<()> {
    match result {
        Ok(stats) => {
            stats.log_summary(name);
            if cancel.is_cancelled() {
                println!("\n👋 모니터를 종료합니다");
            }
            Ok(())
        }
        Err(e) => {
            error!("{} 실패: {}", name, e);
            Err(e).with_context(|| format!("{} 실행 실패", name))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 설정 로드
    let config = AppConfig::load(cli.config.as_deref()).context("설정 로드 실패")?;

    // 로깅 초기화 (CLI 옵션 우선)
    let mut log_config = LogConfig::from_settings(&config.logging);
    if let Some(level) = cli.log_level {
        log_config.level = level;
    }
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format.into());
    }
    init_logging(log_config).map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    let cancel = CancellationToken::new();

    match cli.command {
        Commands::Monitor {
            venue,
            interval,
            display_count,
            batch_size,
            cycles,
            render,
        } => {
            let monitor_config = &config.monitor;
            let interval = interval
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| monitor_config.interval());

            let settings = MarketSettings {
                title: format!(
                    "{} {} markets ({} converted)",
                    venue.display_name(),
                    monitor_config.quote,
                    monitor_config.secondary
                ),
                quote: monitor_config.quote.clone(),
                secondary: monitor_config.secondary.clone(),
                display_count: display_count.unwrap_or(monitor_config.display_count),
                batch_size: batch_size.unwrap_or(monitor_config.batch_size),
                interval,
            };

            let (catalog, tickers, rates): (
                Box<dyn MarketCatalog>,
                Box<dyn TickerSource>,
                Box<dyn CrossRateSource>,
            ) = match venue {
                Venue::Upbit => {
                    let client = UpbitClient::new(&config.http, config.upbit.base_url.as_deref())?;
                    (
                        Box::new(client.clone()),
                        Box::new(client.clone()),
                        Box::new(client),
                    )
                }
                Venue::Bithumb => {
                    let client =
                        BithumbClient::new(&config.http, config.bithumb.base_url.as_deref())?
                            .with_quote(&monitor_config.quote);
                    (
                        Box::new(client.clone()),
                        Box::new(client.clone()),
                        Box::new(client),
                    )
                }
            };

            info!(
                venue = %venue,
                interval_secs = interval.as_secs(),
                display_count = settings.display_count,
                "🚀 시세 모니터 시작 (Ctrl+C로 종료)"
            );

            let mut monitor =
                MarketMonitor::new(settings, catalog, tickers, rates, make_renderer(render));
            let scheduler =
                FixedPeriodScheduler::new(interval, cancel.clone()).with_max_cycles(cycles);

            spawn_interrupt_handler(cancel.clone());
            let result = monitor.run(&scheduler).await;
            finish_monitor("시세 모니터", result, &cancel)?;
        }

        Commands::Usdt {
            interval,
            cycles,
            render,
        } => {
            let interval = interval
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| config.usdt.interval());
            let client = UpbitClient::new(&config.http, config.upbit.base_url.as_deref())?;
            let symbol = Symbol::new(&config.monitor.secondary, &config.monitor.quote);

            info!(market = %symbol, "🚀 USDT 시세 모니터 시작 (Ctrl+C로 종료)");

            let mut monitor = UsdtMonitor::new(symbol, Box::new(client), make_renderer(render));
            let scheduler =
                FixedPeriodScheduler::new(interval, cancel.clone()).with_max_cycles(cycles);

            spawn_interrupt_handler(cancel.clone());
            let result = scheduler.run(&mut monitor).await;
            finish_monitor("USDT 모니터", result, &cancel)?;
        }

        Commands::Forex {
            base,
            quote,
            interval,
            cycles,
            render,
        } => {
            let forex_config = &config.forex_monitor;
            let interval = interval
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| forex_config.interval());
            let base = base.unwrap_or_else(|| forex_config.base.clone());
            let quote = quote.unwrap_or_else(|| forex_config.quote.clone());
            let client = FrankfurterClient::new(&config.http, config.forex.base_url.as_deref())?;

            info!(base = %base, quote = %quote, "🚀 환율 모니터 시작 (Ctrl+C로 종료)");

            let mut monitor =
                ForexMonitor::new(&base, &quote, Box::new(client), make_renderer(render));
            let scheduler =
                FixedPeriodScheduler::new(interval, cancel.clone()).with_max_cycles(cycles);

            spawn_interrupt_handler(cancel.clone());
            let result = scheduler.run(&mut monitor).await;
            finish_monitor("환율 모니터", result, &cancel)?;
        }

        Commands::ExportMarkets {
            venue,
            quote,
            output_dir,
        } => {
            let output_dir =
                output_dir.unwrap_or_else(|| PathBuf::from(&config.export.output_dir));

            let catalog: Box<dyn MarketCatalog> = match venue {
                Venue::Upbit => Box::new(UpbitClient::new(
                    &config.http,
                    config.upbit.base_url.as_deref(),
                )?),
                Venue::Bithumb => Box::new(
                    BithumbClient::new(&config.http, config.bithumb.base_url.as_deref())?
                        .with_quote(&quote),
                ),
            };

            println!("\n📥 {} {} 마켓 목록을 가져옵니다...", venue.display_name(), quote);
            let summary =
                export_markets(catalog.as_ref(), venue, &quote, &output_dir, Local::now()).await?;

            println!("✅ 저장 완료: {}", summary.path.display());
            println!("   {} {} 마켓 수: {}", venue.display_name(), quote, summary.count);
        }

        Commands::Diff {
            left,
            right,
            left_label,
            right_label,
            output_dir,
            prefix,
        } => {
            let request = DiffRequest {
                left,
                right,
                left_label,
                right_label,
                output_dir: output_dir
                    .unwrap_or_else(|| PathBuf::from(&config.export.output_dir)),
                prefix,
            };

            let summary = diff_markets(&request)?;

            println!("\n📊 코인 비교 결과");
            println!("   양쪽 모두: {}개 → {}", summary.diff.both.len(), summary.both_path.display());
            println!(
                "   {} 전용: {}개 → {}",
                request.left_label,
                summary.diff.left_only.len(),
                summary.left_only_path.display()
            );
            println!(
                "   {} 전용: {}개 → {}",
                request.right_label,
                summary.diff.right_only.len(),
                summary.right_only_path.display()
            );
        }
    }

    Ok(())
}
