//! 화면 텍스트 생성.

use coinboard_core::format::{
    format_grouped, format_opt, format_quote_price, format_signed_percent,
};
use coinboard_core::{DisplaySet, NormalizedRow};

use super::{Frame, FrameHeader};

const MARKET_WIDTH: usize = 10;
const PRICE_WIDTH: usize = 15;
const CHANGE_WIDTH: usize = 10;
const VOLUME_WIDTH: usize = 18;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 프레임 전체를 텍스트로 변환합니다.
pub fn format_frame(frame: &Frame) -> String {
    match frame {
        Frame::Table { header, rows } => format_table(header, rows),
        Frame::Panel {
            title,
            timestamp,
            lines,
        } => {
            let mut out = format!("[{}] {}\n", title, timestamp.format(TIMESTAMP_FORMAT));
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
            out
        }
    }
}

/// 한 행의 표시용 셀 문자열. 테이블과 로그 렌더러가 함께 씁니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCells {
    pub price_quote: String,
    pub price_secondary: String,
    pub change: String,
    pub volume_secondary: String,
}

impl RowCells {
    pub fn from_row(row: &NormalizedRow) -> Self {
        Self {
            price_quote: format_quote_price(row.price_quote),
            price_secondary: format_opt(row.price_secondary, 4),
            change: format_signed_percent(row.change_percent, 2),
            volume_secondary: format_opt(row.volume_secondary, 1),
        }
    }
}

/// 시세 테이블을 텍스트로 변환합니다.
///
/// 환율이 없으면 `rate: unavailable`을 표시하고, 보조 통화 열은 `N/A`가 됩니다.
pub fn format_table(header: &FrameHeader, rows: &DisplaySet) -> String {
    let mut out = format!(
        "=== {} === {}\n",
        header.title,
        header.timestamp.format(TIMESTAMP_FORMAT)
    );
    out.push_str(&match &header.rate {
        Some(rate) => format!(
            "rate: 1 {} = {} {}\n",
            rate.base,
            format_grouped(rate.value(), 1),
            rate.quote
        ),
        None => "rate: unavailable\n".to_string(),
    });
    out.push_str(&format!(
        "refresh: every {}s | top {} by {} volume\n",
        header.interval.as_secs(),
        header.display_count,
        header.secondary
    ));

    let columns = format!(
        "{:<mw$}{:>pw$}{:>pw$}{:>cw$}{:>vw$}",
        "market",
        format!("{} price", header.quote),
        format!("{} price", header.secondary),
        "change",
        format!("{} volume", header.secondary),
        mw = MARKET_WIDTH,
        pw = PRICE_WIDTH,
        cw = CHANGE_WIDTH,
        vw = VOLUME_WIDTH,
    );
    out.push_str(&format!("{}\n{}\n", columns, "-".repeat(columns.len())));

    for row in rows.rows() {
        let cells = RowCells::from_row(row);
        out.push_str(&format!(
            "{:<mw$}{:>pw$}{:>pw$}{:>cw$}{:>vw$}\n",
            row.label,
            cells.price_quote,
            cells.price_secondary,
            cells.change,
            cells.volume_secondary,
            mw = MARKET_WIDTH,
            pw = PRICE_WIDTH,
            cw = CHANGE_WIDTH,
            vw = VOLUME_WIDTH,
        ));
    }

    out
}
