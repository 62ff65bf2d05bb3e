//! 記録ファイルモジュール

use crate::error::RecordsError;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 作業セッション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub start: Time,
    pub end: Option<Time>,
}

impl Session {
    /// 開始時刻のみの未終了セッションを作成
    pub fn open(start: Time) -> Self {
        Self { start, end: None }
    }

    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }
}

/// 記録ドキュメント（ファイル全体）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsDocument {
    /// 記録中のセッション
    pub current: Option<Session>,
    /// 終了済みセッション（追加順）
    pub records: Vec<Session>,
}

/// 記録ファイルの読み書き
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// 新しいRecordStoreを作成
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// 空の記録ファイルを作成
    ///
    /// ファイルが既に存在する場合は `overwrite` が真のときのみ上書きする
    pub fn initialize(&self, overwrite: bool) -> Result<RecordsDocument, RecordsError> {
        if self.exists() && !overwrite {
            return Err(RecordsError::AlreadyExists(self.path.clone()));
        }

        // 親ディレクトリが存在しない場合は作成
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = RecordsDocument::default();
        self.save(&document)?;
        info!("記録ファイルを初期化しました: {}", self.path.display());
        Ok(document)
    }

    /// 記録ファイルを読み込んで検証
    pub fn load(&self) -> Result<RecordsDocument, RecordsError> {
        let content = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content)?;
        validate(&value)?;

        let document: RecordsDocument = serde_json::from_value(value)?;
        check_sessions(&document)?;

        debug!(
            "記録ファイルを読み込みました: {} ({}件)",
            self.path.display(),
            document.records.len()
        );
        Ok(document)
    }

    /// 記録ファイルを保存
    ///
    /// 一時ファイルに書き出してから置き換える
    pub fn save(&self, document: &RecordsDocument) -> Result<(), RecordsError> {
        let mut content = serde_json::to_string_pretty(document)?;
        content.push('\n');

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        fs::write(&tmp_path, content)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            // 置き換えに失敗した一時ファイルは残さない
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!("記録ファイルを保存しました: {}", self.path.display());
        Ok(())
    }
}

/// ドキュメントの構造を検証
pub fn validate(value: &Value) -> Result<(), RecordsError> {
    let object = value
        .as_object()
        .ok_or_else(|| schema_error("ルートがオブジェクトではありません"))?;

    match object.get("current") {
        None => return Err(schema_error("current キーがありません")),
        Some(Value::Null) => {}
        Some(session @ Value::Object(_)) => validate_session(session, "current")?,
        Some(_) => return Err(schema_error("current は null かオブジェクトである必要があります")),
    }

    match object.get("records") {
        None => Err(schema_error("records キーがありません")),
        Some(Value::Array(records)) => records
            .iter()
            .enumerate()
            .try_for_each(|(index, session)| {
                validate_session(session, &format!("records[{}]", index))
            }),
        Some(_) => Err(schema_error("records は配列である必要があります")),
    }
}

/// セッション1件の構造を検証
///
/// 時刻文字列の書式は型変換時に検査する
fn validate_session(value: &Value, label: &str) -> Result<(), RecordsError> {
    let object = value.as_object().ok_or_else(|| {
        RecordsError::SchemaError(format!("{} はオブジェクトである必要があります", label))
    })?;

    match object.get("start") {
        Some(Value::String(_)) => {}
        Some(_) => {
            return Err(RecordsError::SchemaError(format!(
                "{}.start は文字列である必要があります",
                label
            )))
        }
        None => {
            return Err(RecordsError::SchemaError(format!(
                "{} に start がありません",
                label
            )))
        }
    }

    match object.get("end") {
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(()),
        Some(_) => Err(RecordsError::SchemaError(format!(
            "{}.end は null か文字列である必要があります",
            label
        ))),
    }
}

/// セッションの開閉状態を検証
fn check_sessions(document: &RecordsDocument) -> Result<(), RecordsError> {
    if let Some(current) = &document.current {
        if current.is_closed() {
            return Err(schema_error("current が既に終了しています"));
        }
    }

    if let Some(index) = document.records.iter().position(|s| !s.is_closed()) {
        return Err(RecordsError::SchemaError(format!(
            "records[{}] に end がありません",
            index
        )));
    }

    Ok(())
}

fn schema_error(message: &str) -> RecordsError {
    RecordsError::SchemaError(message.to_string())
}
