//! SpermVision AI Common Library
//!
//! CLIとWeb(WASM)で共有される選択・プレビュー・模擬解析のコア

pub mod cancel;
pub mod error;
pub mod mock;
pub mod notify;
pub mod preview;
pub mod selector;
pub mod session;
pub mod types;

pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use mock::{generate_result, MockAnalyzer, MockRun};
pub use notify::{Notification, Notifier, Severity};
pub use preview::{
    MediaEvent, Playback, PlaybackCommand, PlaybackControls, PreviewBackend, PreviewChange,
    PreviewController,
};
pub use selector::{FileSelector, Selection, ACCEPT_FILTER, SUPPORTED_FORMATS};
pub use session::{
    AnalysisSession, AnalysisTicket, Completion, Phase, ResultView, StaleResultPolicy,
};
pub use types::{
    format_megabytes, AnalysisResult, FileId, ImageQuality, MediaCategory, SelectedFile,
};
