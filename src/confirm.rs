//! 確認プロンプトモジュール

use std::io::{self, BufRead, Write};

/// ユーザーへの確認
pub trait Confirm {
    /// 肯定された場合は真を返す
    fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

/// 標準入力で確認する
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        print!("{} [y/N]: ", message);
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

/// 常に同じ応答を返す（テスト用）
#[cfg(test)]
pub struct FixedAnswer(pub bool);

#[cfg(test)]
impl Confirm for FixedAnswer {
    fn confirm(&mut self, _message: &str) -> io::Result<bool> {
        Ok(self.0)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("YES"));
        assert!(is_yes("  Yes  "));
    }

    #[test]
    fn test_is_not_yes() {
        // 空入力は否定扱い
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_fixed_answer() {
        assert!(FixedAnswer(true).confirm("上書きしますか？").unwrap());
        assert!(!FixedAnswer(false).confirm("上書きしますか？").unwrap());
    }
}
