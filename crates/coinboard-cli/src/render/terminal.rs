//! 터미널 렌더러.
//!
//! stdout이 터미널이면 매 프레임 화면을 지우고 커서를 맨 위로 옮긴 뒤 그립니다.
//! 파이프/파일로 리다이렉트된 경우에는 그대로 이어서 출력합니다.

use std::io::{self, IsTerminal, Stdout, Write};

use anyhow::Context;
use crossterm::{
    cursor::MoveTo,
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use super::{format_frame, Frame, Renderer};

/// crossterm 기반 콘솔 렌더러.
pub struct TerminalRenderer {
    stdout: Stdout,
    interactive: bool,
}

impl TerminalRenderer {
    /// stdout이 터미널인지 감지해 생성합니다.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            interactive: io::stdout().is_terminal(),
        }
    }

    /// 화면 지우기 없이 이어서 출력합니다.
    pub fn plain() -> Self {
        Self {
            stdout: io::stdout(),
            interactive: false,
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        let text = format_frame(frame);

        if self.interactive {
            self.stdout
                .queue(Clear(ClearType::All))
                .context("failed to clear terminal screen")?
                .queue(MoveTo(0, 0))
                .context("failed to move terminal cursor")?;
        }

        self.stdout
            .write_all(text.as_bytes())
            .context("failed to write frame")?;
        self.stdout
            .flush()
            .context("failed to flush terminal frame")?;

        Ok(())
    }
}
