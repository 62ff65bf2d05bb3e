//! エラー型定義モジュール

use crate::time::Time;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 設定エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML解析エラー: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("設定値が不正です: {0}")]
    InvalidValue(String),
}

/// 時刻エラー
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimeError {
    #[error("時刻の書式が不正です: {0:?}")]
    Format(String),
}

/// 記録ファイルエラー
#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("スキーマエラー: {0}")]
    SchemaError(String),

    #[error("記録ファイルは既に存在します: {}", .0.display())]
    AlreadyExists(PathBuf),
}

/// セッション状態エラー
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("既に記録中です（開始: {0}）")]
    AlreadyRecording(Time),

    #[error("記録中のセッションがありません")]
    NotRecording,
}

/// コマンド解決エラー
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("コマンドが見つかりません: {0}")]
    NotFound(String),

    #[error("コマンドが曖昧です: {token}（候補: {}）", .candidates.join(", "))]
    Ambiguous {
        token: String,
        candidates: Vec<String>,
    },
}

impl DispatchError {
    /// プロセス終了コード
    pub fn exit_code(&self) -> u8 {
        match self {
            DispatchError::NotFound(_) => 1,
            DispatchError::Ambiguous { .. } => 2,
        }
    }
}

/// コマンド実行エラー
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Records(#[from] RecordsError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("入出力エラー: {0}")]
    IoError(#[from] io::Error),

    #[error("初期化を中止しました: {} は変更されていません", .0.display())]
    Declined(PathBuf),
}

impl CommandError {
    /// プロセス終了コード
    ///
    /// 0〜2はディスパッチャが使用するため、ハンドラの失敗は3以上
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::IoError(_) | CommandError::Records(RecordsError::IoError(_)) => 3,
            CommandError::Records(RecordsError::ParseError(_)) => 4,
            CommandError::Records(RecordsError::SchemaError(_)) => 5,
            CommandError::Session(_) => 6,
            CommandError::Declined(_) | CommandError::Records(RecordsError::AlreadyExists(_)) => 7,
        }
    }
}
