//! レポートモジュール

use crate::records::Session;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use tracing::debug;

/// 日別の合計作業時間
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTotal {
    pub day: NaiveDate,
    pub duration: Duration,
}

impl DailyTotal {
    /// 1行分の出力（例: `2024-03-14, Thursday: 3:25:10`）
    pub fn line(&self) -> String {
        format!(
            "{}: {}",
            self.day.format("%Y-%m-%d, %A"),
            format_duration(self.duration)
        )
    }
}

/// レポート生成
pub struct Report {
    totals: Vec<DailyTotal>,
}

impl Report {
    /// 終了済みセッションから日別合計を集計
    ///
    /// 日付の並びは最初に出現した順（日付順ではない）
    pub fn from_sessions(sessions: &[Session]) -> Self {
        let mut totals: Vec<DailyTotal> = Vec::new();
        let mut index_by_day: HashMap<NaiveDate, usize> = HashMap::new();

        for session in sessions {
            let Some(end) = session.end else {
                debug!("未終了のセッションを集計から除外: {}", session.start);
                continue;
            };
            // end < start の場合も符号付きのまま加算する
            let duration = end - session.start;
            let day = session.start.day();

            match index_by_day.get(&day) {
                Some(&index) => {
                    let total = &mut totals[index];
                    total.duration = total.duration + duration;
                }
                None => {
                    index_by_day.insert(day, totals.len());
                    totals.push(DailyTotal { day, duration });
                }
            }
        }

        Self { totals }
    }

    pub fn totals(&self) -> &[DailyTotal] {
        &self.totals
    }

    pub fn lines(&self) -> Vec<String> {
        self.totals.iter().map(DailyTotal::line).collect()
    }

    /// レポートを出力
    pub fn print(&self) {
        for line in self.lines() {
            println!("{}", line);
        }
    }
}

/// 期間を「時:分:秒」形式にフォーマット
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let seconds = total.unsigned_abs();

    format!(
        "{}{}:{:02}:{:02}",
        sign,
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
