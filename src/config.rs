//! 設定モジュール

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 記録ファイルの既定名（カレントディレクトリ基準）
pub const DEFAULT_RECORDS_FILE: &str = "TimeRecords.json";

/// アプリケーション設定
#[derive(Debug, Clone)]
pub struct Config {
    /// 記録ファイルパス
    pub records_file: PathBuf,
    /// ログの詳細度（0: warn, 1: info, 2: debug, 3以上: trace）
    pub verbosity: u8,
    /// 副作用を起こさず実行内容のみ表示
    pub dry_run: bool,
    /// 確認プロンプトを省略
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            records_file: PathBuf::from(DEFAULT_RECORDS_FILE),
            verbosity: 0,
            dry_run: false,
            assume_yes: false,
        }
    }
}

/// TOML設定ファイル用構造体
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    records_file: Option<String>,
    verbosity: Option<u8>,
}

/// CLI引数
#[derive(Debug, Default)]
pub struct CliArgs {
    pub file: Option<PathBuf>,
    pub verbosity: Option<u8>,
    pub dry_run: bool,
    pub yes: bool,
}

impl Config {
    /// 設定を読み込む
    ///
    /// 優先順位: CLI引数 > 設定ファイル > デフォルト値
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path(), cli_args)
    }

    /// 指定した設定ファイルから読み込む
    pub fn load_from(config_path: &Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 設定ファイルを読み込む
        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let file_config: FileConfig = toml::from_str(&content)?;
            config.merge_file_config(&file_config);
        }

        // CLI引数で上書き
        config.merge_cli_args(cli_args);

        // バリデーション
        config.validate()?;

        debug!("設定を読み込みました: {:?}", config);
        Ok(config)
    }

    /// ファイル設定をマージ
    fn merge_file_config(&mut self, file_config: &FileConfig) {
        if let Some(ref path) = file_config.records_file {
            self.records_file = PathBuf::from(path);
        }
        if let Some(verbosity) = file_config.verbosity {
            self.verbosity = verbosity;
        }
    }

    /// CLI引数をマージ
    fn merge_cli_args(&mut self, cli_args: &CliArgs) {
        if let Some(ref path) = cli_args.file {
            self.records_file = path.clone();
        }
        if let Some(verbosity) = cli_args.verbosity {
            self.verbosity = verbosity;
        }
        self.dry_run = cli_args.dry_run;
        self.assume_yes = cli_args.yes;
    }

    /// 設定値をバリデート
    fn validate(&self) -> Result<(), ConfigError> {
        if self.records_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "records_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// 設定ファイルのパスを取得
fn config_file_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".time-records").join("config.toml")
}
