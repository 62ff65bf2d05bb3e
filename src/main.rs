//! Time Records - 作業時間を記録・集計する個人用CLIツール

mod cli;
mod commands;
mod config;
mod confirm;
mod error;
mod logging;
mod records;
mod registry;
mod report;
mod session;
mod time;

use anyhow::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    cli::run()
}
