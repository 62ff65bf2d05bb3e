//! CLIモジュール

use crate::commands::{self, Context};
use crate::config::{CliArgs, Config};
use crate::logging;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Time Records - 作業時間の記録・集計ツール
#[derive(Parser, Debug)]
#[command(name = "timerec")]
#[command(about = "作業時間の記録・集計ツール", long_about = None)]
pub struct Cli {
    /// 実行するコマンド（前方一致で省略可）
    #[arg(default_value = "commands")]
    pub command: String,

    /// 記録ファイルパス（デフォルト: TimeRecords.json）
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// ログの詳細度（0-3）
    #[arg(short, long)]
    pub verbosity: Option<u8>,

    /// 実行内容を表示するのみで変更しない
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// 確認プロンプトに自動で同意
    #[arg(short, long)]
    pub yes: bool,
}

impl Cli {
    fn to_args(&self) -> CliArgs {
        CliArgs {
            file: self.file.clone(),
            verbosity: self.verbosity,
            dry_run: self.dry_run,
            yes: self.yes,
        }
    }
}

/// CLIエントリポイント
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(&cli.to_args())?;
    logging::init(config.verbosity);
    debug!("記録ファイル: {}", config.records_file.display());

    let registry = commands::registry();
    let mut context = Context::from_config(&config);
    let code = registry.dispatch(&cli.command, &mut context);

    Ok(ExitCode::from(code))
}
