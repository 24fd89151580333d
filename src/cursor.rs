/// グリッド上のセル位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// 選択中のセルと表示領域のスクロール位置
pub struct Cursor {
    pos: Position,
    row_offset: usize,
    col_offset: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            pos: Position::new(0, 0),
            row_offset: 0,
            col_offset: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    pub fn move_up(&mut self) {
        self.pos.row = self.pos.row.saturating_sub(1);
    }

    pub fn move_down(&mut self, height: usize) {
        if self.pos.row + 1 < height {
            self.pos.row += 1;
        }
    }

    pub fn move_left(&mut self) {
        self.pos.col = self.pos.col.saturating_sub(1);
    }

    pub fn move_right(&mut self, width: usize) {
        if self.pos.col + 1 < width {
            self.pos.col += 1;
        }
    }

    pub fn jump_to(&mut self, pos: Position) {
        self.pos = pos;
    }

    /// リサイズやロード後にグリッド内へ収める
    pub fn clamp(&mut self, width: usize, height: usize) {
        self.pos.row = self.pos.row.min(height.saturating_sub(1));
        self.pos.col = self.pos.col.min(width.saturating_sub(1));
    }

    /// カーソルが表示領域 (visible_rows x visible_cols セル) に入るようにスクロール
    pub fn scroll(&mut self, visible_rows: usize, visible_cols: usize) {
        let visible_rows = visible_rows.max(1);
        let visible_cols = visible_cols.max(1);

        if self.pos.row < self.row_offset {
            self.row_offset = self.pos.row;
        } else if self.pos.row >= self.row_offset + visible_rows {
            self.row_offset = self.pos.row + 1 - visible_rows;
        }

        if self.pos.col < self.col_offset {
            self.col_offset = self.pos.col;
        } else if self.pos.col >= self.col_offset + visible_cols {
            self.col_offset = self.pos.col + 1 - visible_cols;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_stay_inside_grid() {
        let mut cursor = Cursor::new();
        cursor.move_up();
        cursor.move_left();
        assert_eq!(cursor.position(), Position::new(0, 0));

        for _ in 0..5 {
            cursor.move_down(3);
            cursor.move_right(2);
        }
        assert_eq!(cursor.position(), Position::new(2, 1));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut cursor = Cursor::new();
        cursor.jump_to(Position::new(8, 9));
        cursor.clamp(4, 2);
        assert_eq!(cursor.position(), Position::new(1, 3));
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut cursor = Cursor::new();
        cursor.jump_to(Position::new(12, 30));
        cursor.scroll(10, 20);
        assert_eq!(cursor.row_offset(), 3);
        assert_eq!(cursor.col_offset(), 11);

        cursor.jump_to(Position::new(0, 0));
        cursor.scroll(10, 20);
        assert_eq!(cursor.row_offset(), 0);
        assert_eq!(cursor.col_offset(), 0);
    }
}
