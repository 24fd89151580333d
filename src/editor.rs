use std::io;

use arboard::Clipboard;

use crate::command::Command;
use crate::config::RcConfig;
use crate::cursor::Position;
use crate::error::{GridError, Result};
use crate::file_io::FileIO;
use crate::grid::GridModel;
use crate::logger;
use crate::symbol::{self, Palette};

/// コマンド実行後にイベントループを続けるか
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Editor {
    grid: GridModel,
    filename: Option<String>,
    /// 未保存の変更があるか
    dirty: bool,
    palette: Palette,
    status_message: String,
    /// :yank 用のシステムクリップボード
    clipboard: Option<Clipboard>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::from_grid(GridModel::default(), None)
    }

    pub fn from_config(config: &RcConfig) -> Self {
        let grid = GridModel::new(config.width, config.height).unwrap_or_default();
        let mut editor = Self::from_grid(grid, None);
        editor.palette.select(config.symbol);
        editor
    }

    pub fn from_grid(grid: GridModel, filename: Option<String>) -> Self {
        Self {
            grid,
            filename,
            dirty: false,
            palette: Palette::new(),
            status_message: String::new(),
            clipboard: Clipboard::new().ok(),
        }
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// 保存先だけ設定する (まだ存在しないファイルを指定して起動した場合)
    pub fn set_filename(&mut self, filename: String) {
        self.filename = Some(filename);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn selected_symbol(&self) -> char {
        self.palette.selected()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// エラーをステータスに表示してログにも残す
    pub fn report(&mut self, err: &GridError) {
        let message = err.to_string();
        logger::error(&message);
        self.status_message = message;
    }

    pub fn select_symbol(&mut self, ch: char) -> bool {
        self.palette.select(ch)
    }

    pub fn next_symbol(&mut self) {
        self.palette.next();
    }

    pub fn prev_symbol(&mut self) {
        self.palette.prev();
    }

    /// クリックされたセルを選択中のシンボルで塗る
    pub fn paint(&mut self, pos: Position) -> bool {
        let symbol = self.palette.selected();
        if self.grid.get(pos.row, pos.col) == Some(symbol) {
            return false;
        }
        let changed = self.grid.set_cell(pos.row, pos.col, symbol);
        if changed {
            logger::debug(&format!("paint ({}, {}) with '{}'", pos.row, pos.col, symbol));
        }
        self.dirty |= changed;
        changed
    }

    pub fn fill_all(&mut self) {
        self.fill_with(self.palette.selected());
    }

    pub fn fill_with(&mut self, symbol: char) {
        self.grid.fill_all(symbol);
        self.dirty = true;
        logger::debug(&format!("fill all with '{}'", symbol));
    }

    pub fn resize(&mut self, width: &str, height: &str) -> Result<()> {
        self.grid.resize_from_text(width, height)?;
        self.dirty = true;
        logger::debug(&format!(
            "resized to {}x{}",
            self.grid.width(),
            self.grid.height()
        ));
        Ok(())
    }

    /// 読み込みに失敗した場合グリッドは変更しない
    pub fn open_file(&mut self, filename: String) -> Result<()> {
        let grid = FileIO::open(&filename)?;
        logger::debug(&format!(
            "opened {} ({}x{})",
            filename,
            grid.width(),
            grid.height()
        ));
        self.grid = grid;
        self.filename = Some(filename);
        self.dirty = false;
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        let Some(filename) = &self.filename else {
            return Err(io::Error::new(io::ErrorKind::NotFound, "No file name").into());
        };
        FileIO::save(filename, &self.grid)?;
        logger::debug(&format!("saved {}", filename));
        self.dirty = false;
        Ok(())
    }

    pub fn save_as(&mut self, filename: String) -> Result<()> {
        FileIO::save(&filename, &self.grid)?;
        logger::debug(&format!("saved {}", filename));
        self.filename = Some(filename);
        self.dirty = false;
        Ok(())
    }

    /// マップ全体をテキストとしてクリップボードにコピー
    pub fn yank_map(&mut self) -> bool {
        let text = self.grid.serialize();
        match &mut self.clipboard {
            Some(clipboard) => clipboard.set_text(text).is_ok(),
            None => false,
        }
    }

    pub fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Write(path) => {
                let result = match path {
                    Some(path) => self.save_as(path),
                    None => self.save(),
                };
                match result {
                    Ok(()) => self.report_written(),
                    Err(e) => self.report(&e),
                }
            }
            Command::WriteQuit => match self.save() {
                Ok(()) => return Flow::Quit,
                Err(e) => self.report(&e),
            },
            Command::Quit => {
                if !self.dirty {
                    return Flow::Quit;
                }
                self.set_status("No write since last change (add ! to override)");
            }
            Command::ForceQuit => return Flow::Quit,
            Command::Edit(_) if self.dirty => {
                self.set_status("No write since last change (add ! to override)");
            }
            Command::Edit(path) | Command::ForceEdit(path) => match self.open_file(path) {
                Ok(()) => {
                    let message = format!(
                        "\"{}\" {}x{}",
                        self.filename().unwrap_or_default(),
                        self.grid.width(),
                        self.grid.height()
                    );
                    self.set_status(message);
                }
                Err(e) => self.report(&e),
            },
            Command::Resize { width, height } => match self.resize(&width, &height) {
                Ok(()) => {
                    let message = format!("{}x{}", self.grid.width(), self.grid.height());
                    self.set_status(message);
                }
                Err(e) => self.report(&e),
            },
            Command::Fill(None) => self.fill_all(),
            Command::Fill(Some(c)) => match symbol::from_key(c) {
                Some(c) => self.fill_with(c),
                None => self.set_status(format!("Not an allowed symbol: {}", c)),
            },
            Command::Symbol(c) => {
                if !self.select_symbol(c) {
                    self.set_status(format!("Not an allowed symbol: {}", c));
                }
            }
            Command::Yank => {
                if self.yank_map() {
                    self.set_status("Map copied to clipboard");
                } else {
                    self.set_status("Clipboard unavailable");
                }
            }
        }
        Flow::Continue
    }

    fn report_written(&mut self) {
        let message = format!(
            "\"{}\" {}x{} written",
            self.filename().unwrap_or_default(),
            self.grid.width(),
            self.grid.height()
        );
        self.set_status(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn rows(editor: &Editor) -> Vec<String> {
        editor.grid().rows().map(|r| r.iter().collect()).collect()
    }

    #[test]
    fn test_editor_new() {
        let editor = Editor::new();
        assert_eq!(editor.grid().width(), 10);
        assert_eq!(editor.grid().height(), 10);
        assert!(!editor.is_dirty());
        assert_eq!(editor.filename(), None);
        assert_eq!(editor.selected_symbol(), '.');
    }

    #[test]
    fn test_editor_from_config() {
        let config = RcConfig {
            width: 3,
            height: 2,
            symbol: 'X',
            ..RcConfig::default()
        };
        let editor = Editor::from_config(&config);
        assert_eq!(rows(&editor), vec!["...", "..."]);
        assert_eq!(editor.selected_symbol(), 'X');
    }

    #[test]
    fn test_paint_uses_selected_symbol() {
        let mut editor = Editor::new();
        editor.select_symbol('g');

        assert!(editor.paint(Position::new(2, 3)));
        assert!(editor.is_dirty());
        assert_eq!(editor.grid().get(2, 3), Some('G'));

        // 同じシンボルで塗り直しても変更扱いにしない
        assert!(!editor.paint(Position::new(2, 3)));
    }

    #[test]
    fn test_paint_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("gridmap.log");
        logger::init(&log_path).unwrap();

        let mut editor = Editor::new();
        editor.select_symbol('E');
        editor.paint(Position::new(3, 1));

        if cfg!(debug_assertions) {
            let text = std::fs::read_to_string(&log_path).unwrap();
            assert!(text.contains("DEBUG paint (3, 1) with 'E'"));
        }
    }

    #[test]
    fn test_paint_out_of_bounds() {
        let mut editor = Editor::new();
        editor.select_symbol('X');
        assert!(!editor.paint(Position::new(10, 0)));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_resize_invalid_keeps_grid() {
        let mut editor = Editor::new();
        editor.select_symbol('X');
        editor.paint(Position::new(0, 0));
        let before = editor.grid().clone();

        let flow = editor.execute(Command::Resize {
            width: "abc".to_string(),
            height: "3".to_string(),
        });

        assert_eq!(flow, Flow::Continue);
        assert_eq!(editor.grid(), &before);
        assert!(editor.status_message().starts_with("Invalid width or height"));
    }

    #[test]
    fn test_resize_reflows() {
        let mut editor = Editor::new();
        editor.select_symbol('S');
        editor.paint(Position::new(1, 1));
        editor.resize("2", "2").unwrap();

        assert_eq!(rows(&editor), vec!["..", ".S"]);
    }

    #[test]
    fn test_fill_command() {
        let mut editor = Editor::new();
        editor.execute(Command::Fill(Some('e')));
        assert!(editor.grid().rows().flatten().all(|&c| c == 'E'));

        editor.execute(Command::Fill(Some('Q')));
        assert!(editor.grid().rows().flatten().all(|&c| c == 'E'));
        assert_eq!(editor.status_message(), "Not an allowed symbol: Q");
    }

    #[test]
    fn test_open_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "X.\n.G\nS.\n").unwrap();
        file.flush().unwrap();
        let path = file.path().to_string_lossy().to_string();

        let mut editor = Editor::new();
        editor.execute(Command::Edit(path.clone()));

        assert_eq!(rows(&editor), vec!["X.", ".G", "S."]);
        assert_eq!(editor.filename(), Some(path.as_str()));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_open_malformed_file_keeps_grid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "XXX\nX\n").unwrap();
        file.flush().unwrap();

        let mut editor = Editor::new();
        editor.select_symbol('X');
        editor.paint(Position::new(4, 4));
        let before = editor.grid().clone();

        let result = editor.open_file(file.path().to_string_lossy().to_string());

        assert!(matches!(result, Err(GridError::WidthMismatch { .. })));
        assert_eq!(editor.grid(), &before);
        assert_eq!(editor.filename(), None);
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_edit_refuses_when_dirty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "GG\nGG\n").unwrap();
        file.flush().unwrap();
        let path = file.path().to_string_lossy().to_string();

        let mut editor = Editor::new();
        editor.select_symbol('X');
        editor.paint(Position::new(0, 0));
        let before = editor.grid().clone();

        editor.execute(Command::Edit(path.clone()));
        assert_eq!(editor.grid(), &before);
        assert!(editor.is_dirty());
        assert_eq!(
            editor.status_message(),
            "No write since last change (add ! to override)"
        );

        editor.execute(Command::ForceEdit(path));
        assert_eq!(rows(&editor), vec!["GG", "GG"]);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt").to_string_lossy().to_string();

        let mut editor = Editor::new();
        editor.execute(Command::Edit(path));

        assert!(editor.status_message().starts_with("Can't open file"));
        assert_eq!(editor.grid(), &GridModel::default());
    }

    #[test]
    fn test_save_without_filename() {
        let mut editor = Editor::new();
        assert!(matches!(editor.save(), Err(GridError::Io(_))));
    }

    #[test]
    fn test_write_command_saves_and_clears_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.txt").to_string_lossy().to_string();

        let mut editor = Editor::new();
        editor.resize("3", "2").unwrap();
        editor.select_symbol('X');
        editor.paint(Position::new(0, 1));

        editor.execute(Command::Write(Some(path.clone())));

        assert!(!editor.is_dirty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), ".X.\n...\n");
        assert_eq!(editor.status_message(), format!("\"{}\" 3x2 written", path));
    }

    #[test]
    fn test_quit_refuses_when_dirty() {
        let mut editor = Editor::new();
        assert_eq!(editor.execute(Command::Quit), Flow::Quit);

        editor.fill_all();
        assert_eq!(editor.execute(Command::Quit), Flow::Continue);
        assert_eq!(editor.execute(Command::ForceQuit), Flow::Quit);
    }

    #[test]
    fn test_symbol_command() {
        let mut editor = Editor::new();
        editor.execute(Command::Symbol('e'));
        assert_eq!(editor.selected_symbol(), 'E');

        editor.execute(Command::Symbol('?'));
        assert_eq!(editor.selected_symbol(), 'E');
    }
}
