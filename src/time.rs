//! 時刻モジュール
//!
//! 記録ファイルに保存する時刻は `YYYY-MM-DD HH:MM:SS, <曜日>` 形式に固定。
//! 曜日名はロケールに依存しない英語表記（chronoの `%A`）。

use crate::error::TimeError;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;
use tracing::warn;

/// 保存形式
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S, %A";

/// 日時部分の書式（曜日を除く）
const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 月曜始まりの曜日名（省略形は受け付けない）
const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// 秒精度のローカル時刻
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(NaiveDateTime);

impl Time {
    /// 現在時刻を取得
    pub fn now() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    /// NaiveDateTimeから作成（秒未満は切り捨て）
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self(datetime.with_nanosecond(0).unwrap_or(datetime))
    }

    /// 保存形式の文字列を解析
    ///
    /// 曜日名は英語の完全名のみ（大文字小文字は区別しない）。
    /// 日付と一致しなくてもエラーにしない（警告ログのみ）
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        let format_error = || TimeError::Format(text.to_string());

        let (stamp, weekday_name) = text.split_once(", ").ok_or_else(format_error)?;
        let datetime =
            NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).map_err(|_| format_error())?;

        // ゼロ埋めされていない日付などは受け付けない
        if datetime.format(STAMP_FORMAT).to_string() != stamp {
            return Err(format_error());
        }

        let weekday = WEEKDAY_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(weekday_name))
            .ok_or_else(format_error)?;
        if weekday as u32 != datetime.weekday().num_days_from_monday() {
            warn!(
                "曜日が日付と一致しません: {} (正しくは {:?})",
                text,
                datetime.weekday()
            );
        }

        Ok(Self(datetime))
    }

    /// 保存形式の文字列に変換
    pub fn format(&self) -> String {
        self.0.format(FORMAT).to_string()
    }

    /// 日付部分（集計キー）
    pub fn day(&self) -> NaiveDate {
        self.0.date()
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for Time {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Sub for Time {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0 - rhs.0
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Time::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Time {
        Time::from_naive(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, s)
                .unwrap(),
        )
    }

    #[test]
    fn test_format() {
        assert_eq!(
            at(2024, 3, 14, 9, 30, 0).format(),
            "2024-03-14 09:30:00, Thursday"
        );
    }

    #[test]
    fn test_parse() {
        let time = Time::parse("2024-03-14 09:30:00, Thursday").unwrap();
        assert_eq!(time, at(2024, 3, 14, 9, 30, 0));
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            at(2024, 2, 29, 0, 0, 0),
            at(1999, 12, 31, 23, 59, 59),
            at(2025, 7, 6, 12, 1, 2),
            Time::now(),
        ];
        for time in samples {
            assert_eq!(Time::parse(&time.format()).unwrap(), time);
        }
    }

    #[test]
    fn test_mismatched_weekday_is_accepted() {
        let time = Time::parse("2024-03-14 09:30:00, Monday").unwrap();
        assert_eq!(time, at(2024, 3, 14, 9, 30, 0));
        // 再出力では正しい曜日になる
        assert_eq!(time.format(), "2024-03-14 09:30:00, Thursday");
    }

    #[test]
    fn test_weekday_name_ignores_case() {
        let time = Time::parse("2024-03-14 09:30:00, thursday").unwrap();
        assert_eq!(time, at(2024, 3, 14, 9, 30, 0));
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in [
            "",
            "2024-03-14 09:30:00",
            "2024-03-14T09:30:00, Thursday",
            "2024-3-14 09:30:00, Thursday",
            "2024-03-14 09:30:00, Someday",
            "2024-03-14 09:30:00, thu",
            "2024-03-14 09:30:00, Thurs",
            "2024-02-30 09:30:00, Friday",
        ] {
            assert_eq!(
                Time::parse(text),
                Err(TimeError::Format(text.to_string())),
                "{text}"
            );
        }
    }

    #[test]
    fn test_day_and_sub() {
        let start = at(2024, 3, 14, 9, 0, 0);
        let end = at(2024, 3, 14, 17, 30, 15);
        assert_eq!(start.day(), NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert_eq!((end - start).num_seconds(), 8 * 3600 + 30 * 60 + 15);
        assert_eq!((start - end).num_seconds(), -(8 * 3600 + 30 * 60 + 15));
    }

    #[test]
    fn test_serde_uses_fixed_format() {
        let time = at(2024, 3, 14, 9, 30, 0);
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"2024-03-14 09:30:00, Thursday\"");
        let back: Time = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);
        assert!(serde_json::from_str::<Time>("\"yesterday\"").is_err());
    }
}
