//! 두 마켓 목록 CSV의 코인 집합 비교.
//!
//! `export-markets`로 만든 파일 두 개를 읽어
//! 양쪽 모두 / 왼쪽 전용 / 오른쪽 전용 세 개의 CSV를 씁니다.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use coinboard_core::{diff_coin_sets, CoinRecord, CoinSetDiff};
use serde::Deserialize;
use tracing::info;

/// 비교 요청.
#[derive(Debug, Clone)]
pub struct DiffRequest {
    /// 왼쪽 CSV
    pub left: PathBuf,
    /// 오른쪽 CSV
    pub right: PathBuf,
    /// 왼쪽 이름 (출력 파일명에 사용)
    pub left_label: String,
    /// 오른쪽 이름
    pub right_label: String,
    /// 출력 디렉토리
    pub output_dir: PathBuf,
    /// 출력 파일 접두사
    pub prefix: String,
}

/// 비교 결과.
#[derive(Debug)]
pub struct DiffSummary {
    pub diff: CoinSetDiff,
    pub both_path: PathBuf,
    pub left_only_path: PathBuf,
    pub right_only_path: PathBuf,
}

/// 입력 CSV 한 행. `currency` 등 다른 열은 무시합니다.
#[derive(Debug, Deserialize)]
struct MarketRow {
    market: String,
    #[serde(default)]
    korean_name: Option<String>,
    #[serde(default)]
    english_name: Option<String>,
}

/// 마켓 목록 CSV를 코인 레코드로 읽습니다.
pub fn read_coin_records(path: &Path) -> Result<Vec<CoinRecord>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV: {}", path.display()))?;

    let mut records = Vec::new();
    for row in rdr.deserialize::<MarketRow>() {
        let row = row.with_context(|| format!("Failed to parse CSV row in {}", path.display()))?;
        records.push(CoinRecord::from_market(
            &row.market,
            row.korean_name,
            row.english_name,
        ));
    }
    Ok(records)
}

/// 두 파일을 비교하고 결과 CSV 세 개를 씁니다.
pub fn diff_markets(request: &DiffRequest) -> Result<DiffSummary> {
    let left = read_coin_records(&request.left)?;
    let right = read_coin_records(&request.right)?;
    let diff = diff_coin_sets(&left, &right);

    fs::create_dir_all(&request.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            request.output_dir.display()
        )
    })?;

    let both_path = request
        .output_dir
        .join(format!("{}_both.csv", request.prefix));
    let left_only_path = request.output_dir.join(format!(
        "{}_only_{}.csv",
        request.prefix,
        request.left_label.to_lowercase()
    ));
    let right_only_path = request.output_dir.join(format!(
        "{}_only_{}.csv",
        request.prefix,
        request.right_label.to_lowercase()
    ));

    write_coin_csv(&both_path, &diff.both)?;
    write_coin_csv(&left_only_path, &diff.left_only)?;
    write_coin_csv(&right_only_path, &diff.right_only)?;

    info!(
        both = diff.both.len(),
        left_only = diff.left_only.len(),
        right_only = diff.right_only.len(),
        "코인 집합 비교 완료"
    );

    Ok(DiffSummary {
        diff,
        both_path,
        left_only_path,
        right_only_path,
    })
}

fn write_coin_csv(path: &Path, records: &[CoinRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).context("Failed to create CSV writer")?;

    wtr.write_record(["coin", "korean_name", "english_name"])
        .context("Failed to write CSV header")?;

    for record in records {
        wtr.write_record([
            record.coin.as_str(),
            record.korean_name.as_deref().unwrap_or(""),
            record.english_name.as_deref().unwrap_or(""),
        ])
        .context("Failed to write CSV record")?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}
