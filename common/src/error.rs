//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// 模擬解析の失敗（例外経路）
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// プレビューリソースの生成失敗
    #[error("Preview error: {0}")]
    Preview(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_analysis() {
        let error = Error::Analysis("simulated failure".to_string());
        assert_eq!(format!("{}", error), "Analysis error: simulated failure");
    }

    #[test]
    fn test_error_display_preview() {
        let error = Error::Preview("object URL rejected".to_string());
        assert_eq!(format!("{}", error), "Preview error: object URL rejected");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("遅延設定が不正".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("遅延設定が不正"));
    }
}
