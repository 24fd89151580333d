use std::io::{self, Stdout, Write};

use termion::input::MouseTerminal;
use termion::raw::{IntoRawMode, RawTerminal};

type Output = MouseTerminal<RawTerminal<Stdout>>;

/// raw mode + マウス報告を有効にした端末
pub struct Terminal {
    stdout: Output,
    size: (u16, u16),
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let stdout = MouseTerminal::from(io::stdout().into_raw_mode()?);
        let size = termion::terminal_size()?;
        Ok(Self { stdout, size })
    }

    pub fn stdout(&mut self) -> &mut Output {
        &mut self.stdout
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// ウィンドウサイズが変わっていれば true
    pub fn refresh_size(&mut self) -> io::Result<bool> {
        let size = termion::terminal_size()?;
        let changed = size != self.size;
        self.size = size;
        Ok(changed)
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        write!(
            self.stdout,
            "{}{}",
            termion::clear::All,
            termion::cursor::Goto(1, 1)
        )?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // 終了時の画面クリア
        let _ = self.clear_screen();
        let _ = write!(self.stdout, "{}", termion::cursor::Show);
        let _ = self.stdout.flush();
    }
}
