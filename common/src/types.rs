//! 選択ファイルと解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - SelectedFile: ユーザーが選択したメディアファイル（ペイロードは呼び出し側が決める）
//! - MediaCategory: `video/*` / `image/*` の大分類
//! - AnalysisResult: 模擬解析の出力

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

/// 選択ファイルの同一性を表すID
///
/// 選択のたびに新しいIDが振られるため、同名・同サイズのファイルを
/// 選び直しても別の選択として扱われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(u64);

impl FileId {
    fn next() -> Self {
        FileId(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// メディアの大分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Video,
    Image,
}

impl MediaCategory {
    /// MIMEタイプの先頭から分類を判定（対象外は None）
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        if mime_type.starts_with("video/") {
            Some(MediaCategory::Video)
        } else if mime_type.starts_with("image/") {
            Some(MediaCategory::Image)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Video => "video",
            MediaCategory::Image => "image",
        }
    }
}

/// 選択されたメディアファイル
///
/// `P` はファイル本体への参照（ブラウザでは `web_sys::File`、CLIではパス）。
/// 生成後は変更されず、新しい選択ごとに丸ごと置き換えられる。
#[derive(Debug, Clone)]
pub struct SelectedFile<P = ()> {
    id: FileId,
    name: String,
    size: u64,
    mime_type: String,
    payload: P,
}

impl<P> SelectedFile<P> {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
        payload: P,
    ) -> Self {
        Self {
            id: FileId::next(),
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            payload,
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// 受け付け可能なメディアなら分類を返す
    pub fn category(&self) -> Option<MediaCategory> {
        MediaCategory::from_mime(&self.mime_type)
    }

    /// プレビューの描画種別（video以外はすべて静止画として扱う）
    pub fn preview_kind(&self) -> MediaCategory {
        match self.category() {
            Some(MediaCategory::Video) => MediaCategory::Video,
            _ => MediaCategory::Image,
        }
    }

    pub fn is_video(&self) -> bool {
        self.preview_kind() == MediaCategory::Video
    }

    /// "2.40 MB" 形式のサイズ表記
    pub fn size_label(&self) -> String {
        format_megabytes(self.size)
    }
}

/// バイト数をMB（1024×1024）で小数2桁に整形
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// 画質評価
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ImageQuality {
    pub const ALL: [ImageQuality; 4] = [
        ImageQuality::Excellent,
        ImageQuality::Good,
        ImageQuality::Fair,
        ImageQuality::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Excellent => "excellent",
            ImageQuality::Good => "good",
            ImageQuality::Fair => "fair",
            ImageQuality::Poor => "poor",
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            ImageQuality::Excellent => "Excellent",
            ImageQuality::Good => "Good",
            ImageQuality::Fair => "Fair",
            ImageQuality::Poor => "Poor",
        }
    }
}

/// 解析結果（模擬解析の出力としてのみ生成される）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sperm_count: u32,

    /// 信頼度 [0, 100]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,

    /// 解析時間（秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_time: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_quality: Option<ImageQuality>,
}
