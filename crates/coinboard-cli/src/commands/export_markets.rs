//! 거래소 마켓 목록 CSV 내보내기.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use coinboard_core::MarketInfo;
use coinboard_exchange::MarketCatalog;
use tracing::info;

use super::Venue;

/// 내보내기 결과.
#[derive(Debug)]
pub struct ExportSummary {
    /// 저장된 파일
    pub path: PathBuf,
    /// 기록한 마켓 수
    pub count: usize,
}

/// 출력 파일명: `{venue}_{quote}_pairs_{YYYYmmdd_HHMMSS}.csv`.
pub fn export_file_name(venue: Venue, quote: &str, at: &DateTime<Local>) -> String {
    format!(
        "{}_{}_pairs_{}.csv",
        venue.as_str(),
        quote.to_lowercase(),
        at.format("%Y%m%d_%H%M%S")
    )
}

/// 카탈로그를 조회해 호가 통화가 `quote`인 마켓을 CSV로 저장합니다.
///
/// 출력 디렉토리가 없으면 생성합니다.
pub async fn export_markets(
    catalog: &dyn MarketCatalog,
    venue: Venue,
    quote: &str,
    output_dir: &Path,
    at: DateTime<Local>,
) -> Result<ExportSummary> {
    let quote = quote.to_uppercase();
    let markets = catalog
        .fetch_markets()
        .await
        .with_context(|| format!("Failed to fetch {} markets", venue))?;

    let selected: Vec<&MarketInfo> = markets
        .iter()
        .filter(|m| m.symbol.quote == quote)
        .collect();

    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let path = output_dir.join(export_file_name(venue, &quote, &at));
    write_markets_csv(&path, venue, &selected)?;

    info!(
        venue = %venue,
        quote = %quote,
        count = selected.len(),
        path = %path.display(),
        "마켓 목록 저장 완료"
    );

    Ok(ExportSummary {
        path,
        count: selected.len(),
    })
}

fn write_markets_csv(path: &Path, venue: Venue, markets: &[&MarketInfo]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).context("Failed to create CSV writer")?;

    // Bithumb은 이름 정보가 없어 통화 코드 열을 따로 둡니다
    let header = match venue {
        Venue::Upbit => wtr.write_record(["market", "korean_name", "english_name"]),
        Venue::Bithumb => wtr.write_record(["market", "currency", "korean_name", "english_name"]),
    };
    header.context("Failed to write CSV header")?;

    for market in markets {
        let code = market.symbol.market_code();
        let korean = market.korean_name.as_deref().unwrap_or("");
        let english = market.english_name.as_deref().unwrap_or("");

        let written = match venue {
            Venue::Upbit => wtr.write_record([code.as_str(), korean, english]),
            Venue::Bithumb => {
                wtr.write_record([code.as_str(), market.symbol.base.as_str(), korean, english])
            }
        };
        written.context("Failed to write CSV record")?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}
