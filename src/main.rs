use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use termion::event::{Event, Key, MouseButton, MouseEvent};
use termion::input::TermRead;

use gridmap::command::Command;
use gridmap::config::RcConfig;
use gridmap::cursor::Cursor;
use gridmap::editor::{Editor, Flow};
use gridmap::logger;
use gridmap::mode::ModeManager;
use gridmap::screen::Screen;
use gridmap::terminal::Terminal;

fn main() -> Result<()> {
    let config = RcConfig::load();
    logger::init(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    let mut editor = Editor::from_config(&config);
    if let Some(filename) = std::env::args().nth(1) {
        if Path::new(&filename).exists() {
            // 読めないファイルは保存先にしない
            if let Err(e) = editor.open_file(filename) {
                editor.report(&e);
            }
        } else {
            // 新規ファイルとして保存先だけ設定
            editor.set_status(format!("\"{}\" [New]", filename));
            editor.set_filename(filename);
        }
    }

    let mut terminal = Terminal::new().context("failed to enter raw mode")?;
    let mut cursor = Cursor::new();
    let mut mode = ModeManager::new();

    terminal.clear_screen()?;
    redraw(&mut terminal, &editor, &mut cursor, &mode)?;

    let stdin = io::stdin();
    for event in stdin.events() {
        let event = event.context("failed to read input")?;
        if terminal.refresh_size()? {
            terminal.clear_screen()?;
        }

        let flow = match event {
            Event::Key(key) if mode.is_command() => handle_command_key(key, &mut mode, &mut editor),
            Event::Key(key) => {
                handle_normal_key(key, &mut mode, &mut editor, &mut cursor);
                Flow::Continue
            }
            Event::Mouse(MouseEvent::Press(MouseButton::Left, x, y) | MouseEvent::Hold(x, y)) => {
                if let Some(pos) =
                    Screen::cell_at(x, y, terminal.size(), &cursor, editor.grid())
                {
                    cursor.jump_to(pos);
                    editor.paint(pos);
                }
                Flow::Continue
            }
            _ => Flow::Continue,
        };

        if flow == Flow::Quit {
            break;
        }

        // 入力後に再描画
        redraw(&mut terminal, &editor, &mut cursor, &mode)?;
    }

    logger::debug("quit");
    Ok(())
}

fn redraw(
    terminal: &mut Terminal,
    editor: &Editor,
    cursor: &mut Cursor,
    mode: &ModeManager,
) -> io::Result<()> {
    let size = terminal.size();
    let (visible_rows, visible_cols) = Screen::visible_cells(size);
    let grid = editor.grid();
    cursor.clamp(grid.width(), grid.height());
    cursor.scroll(visible_rows, visible_cols);

    Screen::refresh(
        terminal.stdout(),
        size,
        editor,
        cursor,
        mode.current(),
        mode.command_buffer(),
    )
}

fn handle_normal_key(key: Key, mode: &mut ModeManager, editor: &mut Editor, cursor: &mut Cursor) {
    let (width, height) = (editor.grid().width(), editor.grid().height());
    match key {
        Key::Char(':') => {
            mode.enter_command();
            editor.set_status("");
        }
        Key::Char('h') | Key::Left => cursor.move_left(),
        Key::Char('j') | Key::Down => cursor.move_down(height),
        Key::Char('k') | Key::Up => cursor.move_up(),
        Key::Char('l') | Key::Right => cursor.move_right(width),
        Key::Char(' ') | Key::Char('\n') => {
            editor.paint(cursor.position());
        }
        Key::Char('F') => editor.fill_all(),
        Key::Char('\t') => editor.next_symbol(),
        Key::BackTab => editor.prev_symbol(),
        Key::Char(c) => {
            // . x s g e でシンボル選択
            editor.select_symbol(c);
        }
        _ => {}
    }
}

fn handle_command_key(key: Key, mode: &mut ModeManager, editor: &mut Editor) -> Flow {
    match key {
        Key::Char('\n') => {
            let input = mode.take_command();
            if input.trim().is_empty() {
                return Flow::Continue;
            }
            logger::debug(&format!("command: {}", input));
            match Command::parse(&input) {
                Ok(command) => editor.execute(command),
                Err(e) => {
                    let message = e.to_string();
                    logger::error(&message);
                    editor.set_status(message);
                    Flow::Continue
                }
            }
        }
        Key::Esc => {
            mode.enter_normal();
            Flow::Continue
        }
        Key::Backspace => {
            // 空の状態で Backspace したら Normal に戻る
            if !mode.backspace() {
                mode.enter_normal();
            }
            Flow::Continue
        }
        Key::Char(c) => {
            mode.push(c);
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}
