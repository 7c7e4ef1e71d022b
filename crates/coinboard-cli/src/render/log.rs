//! tracing 이벤트로 출력하는 렌더러.
//!
//! 터미널이 없는 환경(서비스, CI)에서 JSON 로그와 함께 쓰기 위한 용도입니다.

use coinboard_core::format::format_grouped;
use tracing::info;

use super::table::RowCells;
use super::{Frame, Renderer};

/// 프레임을 행 단위 로그 이벤트로 남기는 렌더러.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl LogRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        match frame {
            Frame::Table { header, rows } => {
                let rate = header
                    .rate
                    .as_ref()
                    .map(|r| format_grouped(r.value(), 1))
                    .unwrap_or_else(|| "unavailable".to_string());

                info!(title = %header.title, rate = %rate, rows = rows.len(), "frame");

                for (rank, row) in rows.rows().iter().enumerate() {
                    let cells = RowCells::from_row(row);
                    info!(
                        rank = rank + 1,
                        market = %row.label,
                        price_quote = %cells.price_quote,
                        price_secondary = %cells.price_secondary,
                        change = %cells.change,
                        volume_secondary = %cells.volume_secondary,
                        "row"
                    );
                }
            }
            Frame::Panel { title, lines, .. } => {
                for line in lines {
                    info!(title = %title, "{}", line);
                }
            }
        }
        Ok(())
    }
}
