pub mod command;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod file_io;
pub mod grid;
pub mod logger;
pub mod mode;
pub mod screen;
pub mod symbol;
pub mod terminal;

// 画面レイアウト定数
pub const PALETTE_HEIGHT: u16 = 1;
pub const STATUS_BAR_HEIGHT: u16 = 1;
pub const COMMAND_LINE_HEIGHT: u16 = 1;
pub const UI_HEIGHT: u16 = PALETTE_HEIGHT + STATUS_BAR_HEIGHT + COMMAND_LINE_HEIGHT;
/// 1 セルの表示幅
pub const CELL_WIDTH: u16 = 2;
