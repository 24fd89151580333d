/// マップに置ける文字 (空き / 壁 / スタート / ゴール / 敵)
pub const ALLOWED_CHARACTERS: &str = ".XSGE";

/// 空セル
pub const DEFAULT_SYMBOL: char = '.';

/// パレットの表示順
const PALETTE_ORDER: [char; 5] = ['.', 'E', 'X', 'G', 'S'];

pub fn is_allowed(ch: char) -> bool {
    ALLOWED_CHARACTERS.contains(ch)
}

/// キー入力を許可文字に正規化する (小文字も受け付ける)
pub fn from_key(ch: char) -> Option<char> {
    let upper = ch.to_ascii_uppercase();
    if is_allowed(upper) { Some(upper) } else { None }
}

/// 現在選択中のシンボル
pub struct Palette {
    index: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    pub fn symbols() -> &'static [char] {
        &PALETTE_ORDER
    }

    pub fn selected(&self) -> char {
        PALETTE_ORDER[self.index]
    }

    /// 許可文字以外は無視して false を返す
    pub fn select(&mut self, ch: char) -> bool {
        match from_key(ch).and_then(|c| PALETTE_ORDER.iter().position(|&p| p == c)) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % PALETTE_ORDER.len();
    }

    pub fn prev(&mut self) {
        self.index = (self.index + PALETTE_ORDER.len() - 1) % PALETTE_ORDER.len();
    }
}
