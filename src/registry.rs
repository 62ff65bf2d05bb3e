//! コマンド登録・ディスパッチモジュール
//!
//! 入力されたトークンをコマンド名または別名の前方一致で解決する。
//! 完全一致による優先はなく、候補が複数あれば常に曖昧として扱う。

use crate::commands::Context;
use crate::error::{CommandError, DispatchError};
use tracing::{debug, info};

/// コマンドハンドラ
///
/// 戻り値はプロセス終了コード
pub type Handler = fn(&Registry, &mut Context) -> Result<u8, CommandError>;

/// 登録済みコマンド
pub struct CommandEntry {
    name: &'static str,
    aliases: Vec<&'static str>,
    help: Option<&'static str>,
    handler: Handler,
}

impl CommandEntry {
    /// 新しいCommandEntryを作成
    pub fn new(name: &'static str, handler: Handler) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            help: None,
            handler,
        }
    }

    /// 別名を追加
    pub fn alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    /// ヘルプ文を設定
    pub fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn aliases(&self) -> &[&'static str] {
        &self.aliases
    }

    /// 名前または別名のいずれかがトークンで始まるか
    pub fn matches(&self, token: &str) -> bool {
        self.name.starts_with(token) || self.aliases.iter().any(|a| a.starts_with(token))
    }

    /// 一覧表示用の1行
    fn listing(&self) -> String {
        let line = format!(
            "  {:<12}{:<10}{}",
            self.name,
            self.aliases().join(", "),
            self.help.unwrap_or("")
        );
        line.trim_end().to_string()
    }
}

/// コマンドレジストリ（起動時に構築し以後は変更しない）
#[derive(Default)]
pub struct Registry {
    entries: Vec<CommandEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// コマンドを登録
    pub fn register(mut self, entry: CommandEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// 前方一致する候補を登録順で取得
    pub fn candidates(&self, token: &str) -> Vec<&CommandEntry> {
        self.entries.iter().filter(|e| e.matches(token)).collect()
    }

    /// トークンを一意のコマンドに解決
    pub fn resolve(&self, token: &str) -> Result<&CommandEntry, DispatchError> {
        let mut candidates = self.candidates(token);
        match candidates.len() {
            0 => Err(DispatchError::NotFound(token.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => Err(DispatchError::Ambiguous {
                token: token.to_string(),
                candidates: candidates.iter().map(|e| e.name.to_string()).collect(),
            }),
        }
    }

    /// コマンドを解決して実行し、終了コードを返す
    ///
    /// - 0: 成功
    /// - 1: コマンドが見つからない
    /// - 2: コマンドが曖昧
    /// - 3以上: ハンドラの失敗
    pub fn dispatch(&self, token: &str, context: &mut Context) -> u8 {
        let entry = match self.resolve(token) {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("{}", e);
                let listed: Vec<&CommandEntry> = match &e {
                    DispatchError::NotFound(_) => self.entries.iter().collect(),
                    DispatchError::Ambiguous { .. } => self.candidates(token),
                };
                for line in listing(&listed) {
                    eprintln!("{}", line);
                }
                return e.exit_code();
            }
        };

        if context.dry_run {
            println!(
                "[dry-run] {} を実行します（記録ファイル: {}）",
                entry.name,
                context.store.path().display()
            );
            return 0;
        }

        info!("コマンドを実行: {}", entry.name);
        match (entry.handler)(self, context) {
            Ok(code) => code,
            Err(e) => {
                debug!("{} が失敗しました: {:?}", entry.name, e);
                eprintln!("エラー: {}", e);
                e.exit_code()
            }
        }
    }
}

/// コマンド一覧の各行
pub fn listing(entries: &[&CommandEntry]) -> Vec<String> {
    entries.iter().map(|e| e.listing()).collect()
}
