use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::symbol::{self, DEFAULT_SYMBOL};

const RC_FILE: &str = ".gridmaprc";

#[derive(Debug, Clone, PartialEq)]
pub struct RcConfig {
    pub width: usize,
    pub height: usize,
    pub symbol: char,
    pub log_file: PathBuf,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            symbol: DEFAULT_SYMBOL,
            log_file: PathBuf::from("gridmap.log"),
        }
    }
}

impl RcConfig {
    /// カレントディレクトリ、ホームディレクトリの順に .gridmaprc を探す
    pub fn rc_path() -> Option<PathBuf> {
        let current = Path::new(RC_FILE);
        if current.exists() {
            return Some(current.to_path_buf());
        }

        env::var_os("HOME")
            .map(|home| Path::new(&home).join(RC_FILE))
            .filter(|p| p.exists())
    }

    /// 読めない場合はデフォルト設定
    pub fn load() -> Self {
        Self::rc_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|content| Self::parse(&content))
            .unwrap_or_default()
    }

    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();
        for line in content.lines() {
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            }
            .trim();

            if line.is_empty() || line.starts_with('"') {
                continue;
            }
            config.apply_line(line);
        }
        config
    }

    fn apply_line(&mut self, line: &str) {
        let Some(setting) = line.strip_prefix("set ") else {
            return;
        };
        let Some((key, value)) = setting.trim().split_once('=') else {
            return;
        };
        let value = value.trim();

        // 不正な値は無視
        match key.trim() {
            "width" => {
                if let Ok(n) = value.parse::<usize>()
                    && n > 0
                {
                    self.width = n;
                }
            }
            "height" => {
                if let Ok(n) = value.parse::<usize>()
                    && n > 0
                {
                    self.height = n;
                }
            }
            "symbol" => {
                let mut chars = value.chars();
                if let (Some(c), None) = (chars.next(), chars.next())
                    && let Some(c) = symbol::from_key(c)
                {
                    self.symbol = c;
                }
            }
            "logfile" if !value.is_empty() => self.log_file = PathBuf::from(value),
            _ => {}
        }
    }
}
