//! 組み込みコマンドモジュール

use crate::config::Config;
use crate::confirm::{Confirm, StdinConfirm};
use crate::error::{CommandError, RecordsError};
use crate::records::RecordStore;
use crate::registry::{listing, CommandEntry, Registry};
use crate::report::{format_duration, Report};
use crate::time::Time;
use std::io;
use tracing::{debug, info, warn};

/// コマンド実行コンテキスト
pub struct Context {
    pub store: RecordStore,
    /// 副作用を起こさず実行内容のみ表示
    pub dry_run: bool,
    /// 確認プロンプトを省略して肯定扱い
    pub assume_yes: bool,
    confirm: Box<dyn Confirm>,
}

impl Context {
    /// 新しいContextを作成
    pub fn new(store: RecordStore, confirm: Box<dyn Confirm>) -> Self {
        Self {
            store,
            dry_run: false,
            assume_yes: false,
            confirm,
        }
    }

    /// 設定から作成
    pub fn from_config(config: &Config) -> Self {
        let mut context = Self::new(
            RecordStore::new(config.records_file.clone()),
            Box::new(StdinConfirm),
        );
        context.dry_run = config.dry_run;
        context.assume_yes = config.assume_yes;
        context
    }

    /// ユーザーに確認
    pub fn confirm(&mut self, message: &str) -> io::Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        self.confirm.confirm(message)
    }
}

/// 組み込みコマンドのレジストリを構築
pub fn registry() -> Registry {
    Registry::new()
        .register(CommandEntry::new("commands", list_commands).help("コマンド一覧を表示"))
        .register(
            CommandEntry::new("initialize", initialize)
                .alias("init")
                .help("空の記録ファイルを作成"),
        )
        .register(
            CommandEntry::new("generate", generate)
                .alias("gen")
                .help("日別の作業時間を集計"),
        )
        .register(CommandEntry::new("start", start).alias("s").help("記録を開始"))
        .register(CommandEntry::new("end", end).alias("e").help("記録を終了"))
        .register(
            CommandEntry::new("print", print)
                .alias("dump")
                .help("記録ファイルの内容を表示"),
        )
}

/// コマンド一覧を表示
fn list_commands(registry: &Registry, _context: &mut Context) -> Result<u8, CommandError> {
    let all: Vec<&CommandEntry> = registry.entries().iter().collect();
    for line in listing(&all) {
        println!("{}", line);
    }
    Ok(0)
}

/// 空の記録ファイルを作成
///
/// 既存ファイルは確認が得られた場合のみ上書きする
fn initialize(_registry: &Registry, context: &mut Context) -> Result<u8, CommandError> {
    match context.store.initialize(false) {
        Ok(_) => {}
        Err(RecordsError::AlreadyExists(path)) => {
            warn!("記録ファイルは既に存在します: {}", path.display());
            let message = format!("{} は既に存在します。上書きしますか？", path.display());
            if !context.confirm(&message)? {
                return Err(CommandError::Declined(path));
            }
            context.store.initialize(true)?;
        }
        Err(e) => return Err(e.into()),
    }

    println!(
        "記録ファイルを作成しました: {}",
        context.store.path().display()
    );
    Ok(0)
}

/// 日別の作業時間を表示
fn generate(_registry: &Registry, context: &mut Context) -> Result<u8, CommandError> {
    let document = context.store.load()?;
    let report = Report::from_sessions(&document.records);
    debug!("記録状態: {:?}", document.state());

    if report.totals().is_empty() {
        info!("集計対象の記録がありません");
    }
    if let Some(current) = &document.current {
        info!("記録中のセッションは集計に含まれません（開始: {}）", current.start);
    }

    report.print();
    Ok(0)
}

/// 記録を開始
fn start(_registry: &Registry, context: &mut Context) -> Result<u8, CommandError> {
    let mut document = context.store.load()?;
    let started = document.start(Time::now())?.start;
    context.store.save(&document)?;

    println!("記録を開始しました: {}", started);
    Ok(0)
}

/// 記録を終了
fn end(_registry: &Registry, context: &mut Context) -> Result<u8, CommandError> {
    let mut document = context.store.load()?;
    let now = Time::now();
    let started = document.end(now)?.start;
    context.store.save(&document)?;

    println!(
        "記録を終了しました: {}（{}）",
        now,
        format_duration(now - started)
    );
    Ok(0)
}

/// 記録ファイルの内容を表示
fn print(_registry: &Registry, context: &mut Context) -> Result<u8, CommandError> {
    let document = context.store.load()?;
    let content = serde_json::to_string_pretty(&document).map_err(RecordsError::from)?;
    println!("{}", content);
    Ok(0)
}
