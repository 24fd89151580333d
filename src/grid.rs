use crate::error::{GridError, Result};
use crate::symbol::DEFAULT_SYMBOL;

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;
/// 1 枚のマップに持てるセル数の上限
pub const MAX_CELLS: usize = 1 << 22;

/// 0 や上限超えのサイズを弾く
fn check_dimensions(width: usize, height: usize) -> Result<()> {
    match width.checked_mul(height) {
        Some(cells) if cells > 0 && cells <= MAX_CELLS => Ok(()),
        _ => Err(GridError::invalid_dimensions(width, height)),
    }
}

/// マップ本体
///
/// `cells[row][col]` でアクセスする。どの操作の後でも
/// 行数は `height`、各行の長さは `width` に揃っている。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::blank(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl GridModel {
    /// `height` x `width` の '.' で埋めたグリッドを作る
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self::blank(width, height))
    }

    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![DEFAULT_SYMBOL; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row(&self, index: usize) -> Option<&[char]> {
        self.cells.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// サイズ変更
    ///
    /// 重なる範囲の '.' 以外のセルだけを同じ座標にコピーする。
    /// 縮小時にはみ出したセルは確認なしで捨てる。
    pub fn resize(&mut self, new_width: usize, new_height: usize) -> Result<()> {
        check_dimensions(new_width, new_height)?;

        let old = std::mem::replace(self, Self::blank(new_width, new_height));
        for (row, old_row) in old.cells.iter().enumerate().take(new_height) {
            for (col, &ch) in old_row.iter().enumerate().take(new_width) {
                if ch != DEFAULT_SYMBOL {
                    self.cells[row][col] = ch;
                }
            }
        }
        Ok(())
    }

    /// 入力欄のテキストからサイズ変更
    pub fn resize_from_text(&mut self, width: &str, height: &str) -> Result<()> {
        let (new_width, new_height) = parse_dimensions(width, height)?;
        self.resize(new_width, new_height)
    }

    /// 範囲外の座標は無視して false を返す
    pub fn set_cell(&mut self, row: usize, col: usize, symbol: char) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = symbol;
                true
            }
            None => false,
        }
    }

    pub fn fill_all(&mut self, symbol: char) {
        for row in &mut self.cells {
            row.fill(symbol);
        }
    }

    /// 1 行 1 行を改行で終わらせる。ヘッダなし
    pub fn serialize(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in &self.cells {
            text.extend(row.iter());
            text.push('\n');
        }
        text
    }

    /// テキストからグリッドを作る
    ///
    /// 幅は 1 行目の文字数。全行が同じ幅でなければ `WidthMismatch`。
    /// 許可文字以外もそのまま受け入れる。
    pub fn deserialize(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();

        let width = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let height = lines.len();
        if width == 0 || height == 0 {
            return Err(GridError::invalid_dimensions(width, height));
        }

        let mut cells = Vec::with_capacity(height);
        for (index, line) in lines.iter().enumerate() {
            let row: Vec<char> = line.chars().collect();
            if row.len() != width {
                return Err(GridError::WidthMismatch {
                    line: index + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.push(row);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }
}

/// 幅と高さのテキストを正の整数として解釈する
pub fn parse_dimensions(width: &str, height: &str) -> Result<(usize, usize)> {
    let parse = |text: &str| text.trim().parse::<usize>().ok().filter(|&n| n > 0);
    match (parse(width), parse(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(GridError::invalid_dimensions(width.trim(), height.trim())),
    }
}
