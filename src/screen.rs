use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

use crate::cursor::{Cursor, Position};
use crate::editor::Editor;
use crate::grid::GridModel;
use crate::mode::Mode;
use crate::symbol::Palette;
use crate::{CELL_WIDTH, PALETTE_HEIGHT, UI_HEIGHT};

pub struct Screen;

impl Screen {
    /// 表示できるセル数 (行, 列)
    pub fn visible_cells(size: (u16, u16)) -> (usize, usize) {
        let (cols, rows) = size;
        (
            rows.saturating_sub(UI_HEIGHT) as usize,
            (cols / CELL_WIDTH) as usize,
        )
    }

    /// 端末座標 (1 始まり) からセル位置を求める
    pub fn cell_at(
        x: u16,
        y: u16,
        size: (u16, u16),
        cursor: &Cursor,
        grid: &GridModel,
    ) -> Option<Position> {
        let (visible_rows, visible_cols) = Self::visible_cells(size);
        let screen_row = y.checked_sub(1 + PALETTE_HEIGHT)? as usize;
        let screen_col = (x.checked_sub(1)? / CELL_WIDTH) as usize;
        if screen_row >= visible_rows || screen_col >= visible_cols {
            return None;
        }

        let row = screen_row + cursor.row_offset();
        let col = screen_col + cursor.col_offset();
        if row < grid.height() && col < grid.width() {
            Some(Position::new(row, col))
        } else {
            None
        }
    }

    /// セルを CELL_WIDTH 桁に揃えた文字列
    fn cell_text(ch: char) -> String {
        // 制御文字などは表示できないので置き換える
        let (ch, width) = match ch.width() {
            Some(w) if w > 0 => (ch, w),
            _ => ('?', 1),
        };
        let padding = (CELL_WIDTH as usize).saturating_sub(width);
        format!("{}{}", ch, " ".repeat(padding))
    }

    pub fn draw_palette(stdout: &mut impl Write, selected: char) -> io::Result<()> {
        write!(stdout, "{}", termion::clear::CurrentLine)?;
        for &symbol in Palette::symbols() {
            if symbol == selected {
                write!(
                    stdout,
                    "{}[{}]{} ",
                    termion::style::Bold,
                    symbol,
                    termion::style::Reset
                )?;
            } else {
                write!(stdout, " {}  ", symbol)?;
            }
        }
        write!(stdout, "  Fill: F")?;
        Ok(())
    }

    pub fn draw_rows(
        stdout: &mut impl Write,
        grid: &GridModel,
        cursor: &Cursor,
        visible_rows: usize,
        visible_cols: usize,
    ) -> io::Result<()> {
        let current = cursor.position();

        for i in 0..visible_rows {
            write!(stdout, "\r\n")?;
            let row_index = cursor.row_offset() + i;

            if let Some(row) = grid.row(row_index) {
                for (col, &ch) in row
                    .iter()
                    .enumerate()
                    .skip(cursor.col_offset())
                    .take(visible_cols)
                {
                    let text = Self::cell_text(ch);
                    if current == Position::new(row_index, col) {
                        write!(
                            stdout,
                            "{}{}{}",
                            termion::style::Invert,
                            text,
                            termion::style::Reset
                        )?;
                    } else {
                        write!(stdout, "{}", text)?;
                    }
                }
            } else {
                // グリッドの外
                write!(stdout, "~")?;
            }
            write!(stdout, "{}", termion::clear::UntilNewline)?;
        }
        Ok(())
    }

    pub fn draw_status_bar(
        stdout: &mut impl Write,
        editor: &Editor,
        cursor: &Cursor,
        cols: u16,
    ) -> io::Result<()> {
        // ステータスバー（反転表示）
        write!(stdout, "\r\n{}", termion::style::Invert)?;

        let grid = editor.grid();
        let name = editor.filename().unwrap_or("[No Name]");
        let modified = if editor.is_dirty() { " [+]" } else { "" };
        let status = format!(
            "{}{} - {}x{} - symbol '{}'",
            name,
            modified,
            grid.width(),
            grid.height(),
            editor.selected_symbol()
        );
        write!(stdout, "{}", status)?;

        let pos = cursor.position();
        let pos = format!(" {},{} ", pos.row + 1, pos.col + 1);
        let padding = (cols as usize)
            .saturating_sub(status.chars().count())
            .saturating_sub(pos.len());
        write!(stdout, "{}{}", " ".repeat(padding), pos)?;

        write!(stdout, "{}", termion::style::Reset)?;
        Ok(())
    }

    pub fn draw_command_line(
        stdout: &mut impl Write,
        mode: Mode,
        command_buffer: &str,
        status_message: &str,
    ) -> io::Result<()> {
        write!(stdout, "\r\n")?;
        write!(stdout, "{}", termion::clear::CurrentLine)?;
        match mode {
            Mode::Command => write!(stdout, ":{}", command_buffer)?,
            Mode::Normal => write!(stdout, "{}", status_message)?,
        }
        Ok(())
    }

    pub fn refresh(
        stdout: &mut impl Write,
        size: (u16, u16),
        editor: &Editor,
        cursor: &Cursor,
        mode: Mode,
        command_buffer: &str,
    ) -> io::Result<()> {
        let (visible_rows, visible_cols) = Self::visible_cells(size);

        write!(stdout, "{}", termion::cursor::Hide)?;
        write!(stdout, "{}", termion::cursor::Goto(1, 1))?;

        Self::draw_palette(stdout, editor.selected_symbol())?;
        Self::draw_rows(stdout, editor.grid(), cursor, visible_rows, visible_cols)?;
        Self::draw_status_bar(stdout, editor, cursor, size.0)?;
        Self::draw_command_line(stdout, mode, command_buffer, editor.status_message())?;

        match mode {
            Mode::Command => {
                // コマンドモード時はコマンドライン上にカーソル
                let col = command_buffer.chars().count() as u16 + 2;
                write!(stdout, "{}", termion::cursor::Goto(col, size.1))?;
                write!(stdout, "{}", termion::cursor::Show)?;
            }
            Mode::Normal => {
                // セルは反転表示しているので端末カーソルは隠したまま
            }
        }

        stdout.flush()?;
        Ok(())
    }
}
