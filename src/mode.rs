use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Normal,
    Command,
}

/// 現在のモードとコマンドライン入力
pub struct ModeManager {
    current: Mode,
    command_buffer: String,
}

impl Default for ModeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeManager {
    pub fn new() -> Self {
        Self {
            current: Mode::Normal,
            command_buffer: String::new(),
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn is_command(&self) -> bool {
        self.current == Mode::Command
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn enter_command(&mut self) {
        self.current = Mode::Command;
        self.command_buffer.clear();
    }

    pub fn enter_normal(&mut self) {
        self.current = Mode::Normal;
        self.command_buffer.clear();
    }

    pub fn push(&mut self, ch: char) {
        self.command_buffer.push(ch);
    }

    /// 書記素クラスタ単位で 1 つ消す。空なら false
    pub fn backspace(&mut self) -> bool {
        match self.command_buffer.grapheme_indices(true).next_back() {
            Some((index, _)) => {
                self.command_buffer.truncate(index);
                true
            }
            None => false,
        }
    }

    /// Enter で確定したコマンド文字列を取り出して Normal に戻る
    pub fn take_command(&mut self) -> String {
        let command = std::mem::take(&mut self.command_buffer);
        self.current = Mode::Normal;
        command
    }
}
