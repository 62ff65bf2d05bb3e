//! セッション状態遷移モジュール

use crate::error::SessionError;
use crate::records::{RecordsDocument, Session};
use crate::time::Time;

/// 記録状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 記録していない
    Idle,
    /// 記録中
    Recording,
}

impl RecordsDocument {
    /// 現在の記録状態
    pub fn state(&self) -> SessionState {
        match self.current {
            Some(_) => SessionState::Recording,
            None => SessionState::Idle,
        }
    }

    /// 記録を開始（Idle → Recording）
    ///
    /// 失敗した場合ドキュメントは変更されない
    pub fn start(&mut self, now: Time) -> Result<&Session, SessionError> {
        if let Some(current) = &self.current {
            return Err(SessionError::AlreadyRecording(current.start));
        }
        Ok(self.current.insert(Session::open(now)))
    }

    /// 記録を終了（Recording → Idle）
    ///
    /// 終了したセッションは records の末尾に追加される
    pub fn end(&mut self, now: Time) -> Result<&Session, SessionError> {
        let mut session = self.current.take().ok_or(SessionError::NotRecording)?;
        session.end = Some(now);
        self.records.push(session);
        Ok(&self.records[self.records.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(text: &str) -> Time {
        Time::parse(text).unwrap()
    }

    #[test]
    fn test_initial_state_is_idle() {
        assert_eq!(RecordsDocument::default().state(), SessionState::Idle);
    }

    #[test]
    fn test_start_from_idle() {
        let mut document = RecordsDocument::default();
        let now = time("2024-03-14 09:00:00, Thursday");

        let session = document.start(now).unwrap();
        assert_eq!(session.start, now);
        assert_eq!(session.end, None);
        assert_eq!(document.state(), SessionState::Recording);
        assert!(document.records.is_empty());
    }

    #[test]
    fn test_end_from_recording() {
        let mut document = RecordsDocument::default();
        let start = time("2024-03-14 09:00:00, Thursday");
        let end = time("2024-03-14 12:15:00, Thursday");
        document.records.push(Session {
            start: time("2024-03-13 09:00:00, Wednesday"),
            end: Some(time("2024-03-13 10:00:00, Wednesday")),
        });
        document.start(start).unwrap();

        let closed = document.end(end).unwrap().clone();
        assert_eq!(closed, Session { start, end: Some(end) });
        assert_eq!(document.state(), SessionState::Idle);
        assert_eq!(document.records.len(), 2);
        assert_eq!(document.records.last(), Some(&closed));
    }

    #[test]
    fn test_start_while_recording_fails() {
        let mut document = RecordsDocument::default();
        let start = time("2024-03-14 09:00:00, Thursday");
        document.start(start).unwrap();
        let before = document.clone();

        let result = document.start(time("2024-03-14 10:00:00, Thursday"));
        assert_eq!(result, Err(SessionError::AlreadyRecording(start)));
        assert_eq!(document, before);
    }

    #[test]
    fn test_end_while_idle_fails() {
        let mut document = RecordsDocument::default();
        let before = document.clone();

        let result = document.end(time("2024-03-14 10:00:00, Thursday"));
        assert_eq!(result, Err(SessionError::NotRecording));
        assert_eq!(document, before);
    }
}
