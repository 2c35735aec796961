//! 解析結果の出力（表示とJSON保存）

use crate::error::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use spermvision_common::{AnalysisResult, MediaCategory, Notification, SelectedFile, Severity};
use std::path::Path;

/// JSON出力用レポート
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub file_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub media_category: MediaCategory,
    pub result: AnalysisResult,
    pub analyzed_at: DateTime<Local>,
}

impl AnalysisReport {
    pub fn new<P>(file: &SelectedFile<P>, result: AnalysisResult) -> Self {
        Self {
            file_name: file.name().to_string(),
            size_bytes: file.size(),
            mime_type: file.mime_type().to_string(),
            media_category: file.preview_kind(),
            result,
            analyzed_at: Local::now(),
        }
    }

    pub fn save(&self, output: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(output, json)?;
        Ok(())
    }
}

/// 通知の1行表示
pub fn format_notification(notification: &Notification) -> String {
    let icon = match notification.severity {
        Severity::Info => "ℹ",
        Severity::Warning => "⚠",
        Severity::Success => "✔",
        Severity::Error => "✖",
    };
    format!("{} {}: {}", icon, notification.title, notification.description)
}

/// 結果パネルの内容
pub fn format_result(result: &AnalysisResult) -> Vec<String> {
    let mut lines = vec![format!("  精子数: {}", result.sperm_count)];
    if let Some(confidence) = result.confidence {
        lines.push(format!("  信頼度: {}%", confidence));
    }
    if let Some(time) = result.analysis_time {
        lines.push(format!("  解析時間: {:.1}s", time));
    }
    if let Some(quality) = result.image_quality {
        lines.push(format!("  画質: {}", quality.label()));
    }
    lines
}
