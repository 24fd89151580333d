use thiserror::Error;

/// コマンドラインから入力できるコマンド
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `:w` / `:w path`
    Write(Option<String>),
    /// `:wq`
    WriteQuit,
    /// `:q`
    Quit,
    /// `:q!`
    ForceQuit,
    /// `:e path`
    Edit(String),
    /// `:e! path` (未保存の変更を捨てる)
    ForceEdit(String),
    /// `:resize W H` / `:size W H`
    Resize { width: String, height: String },
    /// `:fill` / `:fill S`
    Fill(Option<char>),
    /// `:sym S`
    Symbol(char),
    /// `:yank`
    Yank,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Not an editor command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    MissingArgument(&'static str),
    #[error("Not a single symbol: {0}")]
    BadSymbol(String),
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parts = input.split_whitespace();
        let name = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        match name {
            "w" => Ok(Command::Write(args.first().map(|s| s.to_string()))),
            "wq" | "x" => Ok(Command::WriteQuit),
            "q" => Ok(Command::Quit),
            "q!" => Ok(Command::ForceQuit),
            "e" => args
                .first()
                .map(|p| Command::Edit(p.to_string()))
                .ok_or(ParseError::MissingArgument("e {file}")),
            "e!" => args
                .first()
                .map(|p| Command::ForceEdit(p.to_string()))
                .ok_or(ParseError::MissingArgument("e! {file}")),
            "resize" | "size" => match args.as_slice() {
                // 数値の検証はグリッド側で行う
                [w, h] => Ok(Command::Resize {
                    width: w.to_string(),
                    height: h.to_string(),
                }),
                _ => Err(ParseError::MissingArgument("resize {width} {height}")),
            },
            "fill" => match args.first() {
                Some(arg) => single_char(arg).map(|c| Command::Fill(Some(c))),
                None => Ok(Command::Fill(None)),
            },
            "sym" => args
                .first()
                .ok_or(ParseError::MissingArgument("sym {symbol}"))
                .and_then(|arg| single_char(arg))
                .map(Command::Symbol),
            "yank" => Ok(Command::Yank),
            _ => Err(ParseError::Unknown(input.to_string())),
        }
    }
}

fn single_char(arg: &str) -> Result<char, ParseError> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::BadSymbol(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write() {
        assert_eq!(Command::parse("w"), Ok(Command::Write(None)));
        assert_eq!(
            Command::parse("w maps/level1.txt"),
            Ok(Command::Write(Some("maps/level1.txt".to_string())))
        );
        assert_eq!(Command::parse("wq"), Ok(Command::WriteQuit));
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("q!"), Ok(Command::ForceQuit));
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(
            Command::parse("e map.txt"),
            Ok(Command::Edit("map.txt".to_string()))
        );
        assert_eq!(
            Command::parse("e! map.txt"),
            Ok(Command::ForceEdit("map.txt".to_string()))
        );
        assert!(matches!(
            Command::parse("e"),
            Err(ParseError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_parse_resize() {
        assert_eq!(
            Command::parse("resize 20 15"),
            Ok(Command::Resize {
                width: "20".to_string(),
                height: "15".to_string()
            })
        );
        assert!(matches!(
            Command::parse("size 20"),
            Err(ParseError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_parse_fill_and_symbol() {
        assert_eq!(Command::parse("fill"), Ok(Command::Fill(None)));
        assert_eq!(Command::parse("fill X"), Ok(Command::Fill(Some('X'))));
        assert_eq!(Command::parse("sym g"), Ok(Command::Symbol('g')));
        assert!(matches!(
            Command::parse("fill XX"),
            Err(ParseError::BadSymbol(_))
        ));
    }

    #[test]
    fn test_parse_unknown() {
        let err = Command::parse("foo bar").unwrap_err();
        assert_eq!(err.to_string(), "Not an editor command: foo bar");
    }

    #[test]
    fn test_parse_error_converts_to_anyhow() {
        fn run(input: &str) -> anyhow::Result<Command> {
            Ok(Command::parse(input)?)
        }

        let err = run("size 1").unwrap_err();
        assert_eq!(err.to_string(), "Usage: resize {width} {height}");
        assert!(err.downcast_ref::<ParseError>().is_some());
    }
}
