//! 通知（トースト）チャネル
//!
//! 送りっぱなしの一時メッセージ。確認応答もキューの保証もなく、表示順のみ保たれる。

use crate::types::AnalysisResult;
use serde::{Deserialize, Serialize};

/// 通知の重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    /// 破壊的（赤系）表示にするか
    pub fn is_destructive(&self) -> bool {
        matches!(self, Severity::Warning | Severity::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// ファイル未選択で解析を開始しようとした
    pub fn no_file_selected() -> Self {
        Self::new(
            Severity::Warning,
            "No file selected",
            "Please select a video or image file to analyze.",
        )
    }

    /// 解析完了
    pub fn analysis_complete(result: &AnalysisResult) -> Self {
        let confidence = result
            .confidence
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self::new(
            Severity::Success,
            "Analysis complete",
            format!(
                "Detected {} sperm cells with {}% confidence.",
                result.sperm_count, confidence
            ),
        )
    }

    /// 解析失敗
    pub fn analysis_failed() -> Self {
        Self::new(
            Severity::Error,
            "Analysis failed",
            "An error occurred during analysis. Please try again.",
        )
    }
}

/// 通知の送り先
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}
