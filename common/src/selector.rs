//! ファイル選択（ドラッグ&ドロップ / 参照ダイアログ）
//!
//! 選択状態は持たない。受け付けた選択・解除は [`Selection`] として上位へ返し、
//! 保持するのはドラッグ中フラグのみ。

use crate::types::{MediaCategory, SelectedFile};

/// 参照ダイアログに渡す accept フィルタ（あくまで参考扱い）
pub const ACCEPT_FILTER: &str = "video/*,image/*";

/// 対応形式の案内文
pub const SUPPORTED_FORMATS: &str = "MP4, AVI, JPG, PNG";

/// 上位へ報告する選択イベント
#[derive(Debug, Clone)]
pub enum Selection<P> {
    Chosen(SelectedFile<P>),
    Removed,
}

impl<P> Selection<P> {
    /// `selectFile(file-or-none)` の引数形に変換
    pub fn into_file(self) -> Option<SelectedFile<P>> {
        match self {
            Selection::Chosen(file) => Some(file),
            Selection::Removed => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileSelector {
    drag_over: bool,
}

impl FileSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    /// dragenter / dragover
    pub fn drag_enter(&mut self) {
        self.drag_over = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    /// ドロップされた一覧から最初の video/image を選ぶ
    ///
    /// 該当がなければ `None`（直前の選択はそのまま、通知もしない）。
    pub fn drop_files<P, I>(&mut self, files: I) -> Option<Selection<P>>
    where
        I: IntoIterator<Item = SelectedFile<P>>,
    {
        self.drag_over = false;

        let mut skipped = 0usize;
        for file in files {
            if file.category().is_some() {
                tracing::debug!(
                    name = file.name(),
                    mime = file.mime_type(),
                    skipped,
                    "dropped file accepted"
                );
                return Some(Selection::Chosen(file));
            }
            skipped += 1;
        }

        tracing::debug!(skipped, "drop ignored: no video or image entries");
        None
    }

    /// 参照ダイアログの結果（単一ファイル）をそのまま受け付ける
    pub fn browse<P>(&self, file: Option<SelectedFile<P>>) -> Option<Selection<P>> {
        let file = file?;
        if file.category().is_none() {
            tracing::debug!(
                name = file.name(),
                mime = file.mime_type(),
                "browsed file has no media category, accepting anyway"
            );
        }
        Some(Selection::Chosen(file))
    }

    /// 解除ボタン（ファイル選択中かつ解析中でない場合のみ有効）
    pub fn remove<P>(&self, has_file: bool, is_analyzing: bool) -> Option<Selection<P>> {
        if Self::can_remove(has_file, is_analyzing) {
            Some(Selection::Removed)
        } else {
            None
        }
    }

    pub fn can_remove(has_file: bool, is_analyzing: bool) -> bool {
        has_file && !is_analyzing
    }
}

/// 選択済みファイルのアイコン種別
pub fn file_icon_kind<P>(file: &SelectedFile<P>) -> MediaCategory {
    file.preview_kind()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str) -> SelectedFile<()> {
        SelectedFile::new(name, 1024, mime, ())
    }

    #[test]
    fn test_drop_picks_first_media_entry() {
        let mut selector = FileSelector::new();
        selector.drag_enter();

        let files = vec![
            file("notes.txt", "text/plain"),
            file("cells.png", "image/png"),
            file("clip.mp4", "video/mp4"),
        ];
        let chosen = selector.drop_files(files).and_then(Selection::into_file);

        assert_eq!(chosen.map(|f| f.name().to_string()), Some("cells.png".to_string()));
        assert!(!selector.is_drag_over());
    }

    #[test]
    fn test_drop_without_media_is_noop() {
        let mut selector = FileSelector::new();
        selector.drag_enter();

        let result = selector.drop_files(vec![file("readme.txt", "text/plain")]);
        assert!(result.is_none());
        assert!(!selector.is_drag_over());
    }

    #[test]
    fn test_drop_empty_list() {
        let mut selector = FileSelector::new();
        assert!(selector.drop_files(Vec::<SelectedFile<()>>::new()).is_none());
    }

    #[test]
    fn test_browse_accepts_unconditionally() {
        let selector = FileSelector::new();
        let chosen = selector
            .browse(Some(file("data.csv", "text/csv")))
            .and_then(Selection::into_file);
        assert_eq!(chosen.map(|f| f.mime_type().to_string()), Some("text/csv".to_string()));

        assert!(selector.browse::<()>(None).is_none());
    }

    #[test]
    fn test_remove_guarded_by_state() {
        let selector = FileSelector::new();
        assert!(matches!(selector.remove::<()>(true, false), Some(Selection::Removed)));
        assert!(selector.remove::<()>(true, true).is_none());
        assert!(selector.remove::<()>(false, false).is_none());
    }

    #[test]
    fn test_drag_state_transitions() {
        let mut selector = FileSelector::new();
        assert!(!selector.is_drag_over());
        selector.drag_enter();
        assert!(selector.is_drag_over());
        selector.drag_leave();
        assert!(!selector.is_drag_over());
    }

    #[test]
    fn test_file_icon_kind() {
        assert_eq!(file_icon_kind(&file("a.mp4", "video/mp4")), MediaCategory::Video);
        assert_eq!(file_icon_kind(&file("a.png", "image/png")), MediaCategory::Image);
    }
}
