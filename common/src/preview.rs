//! メディアプレビューのリソース管理と再生状態
//!
//! プレビュー用ハンドル（ブラウザではオブジェクトURL、CLIではファイルハンドル）は
//! [`PreviewController`] が「現在のリソース」スロットで一つだけ保持する。
//! 選択ファイルの同一性が変わるたびに、古いハンドルを解放してから新しいハンドルを取得する。

use crate::error::Result;
use crate::types::{FileId, MediaCategory, SelectedFile};

/// プレビューハンドルの取得・解放を行うバックエンド
pub trait PreviewBackend {
    /// 選択ファイルのペイロード型
    type Payload;
    /// 取得したハンドル
    type Handle;

    fn acquire(&mut self, file: &SelectedFile<Self::Payload>) -> Result<Self::Handle>;

    fn release(&mut self, handle: Self::Handle);
}

/// 現在表示中のプレビュー
#[derive(Debug)]
pub struct ActivePreview<H> {
    file_id: FileId,
    kind: MediaCategory,
    handle: H,
}

impl<H> ActivePreview<H> {
    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn kind(&self) -> MediaCategory {
        self.kind
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }
}

/// `sync` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewChange {
    /// 同じファイルのまま
    Unchanged,
    /// 新しいハンドルを取得した
    Replaced,
    /// 選択が空になり、ハンドルを解放した
    Cleared,
    /// ハンドル取得に失敗（プレビューなし）
    Unavailable,
}

/// 再生コントロールの表示状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackControls {
    pub enabled: bool,
    pub playing: bool,
}

/// メディア要素へ送る操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
    /// 先頭へシークして再生
    Restart,
}

/// メディア要素側で発生したイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
}

/// 再生中フラグ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Playback {
    playing: bool,
}

impl Playback {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle(&mut self, is_analyzing: bool) -> Option<PlaybackCommand> {
        if is_analyzing {
            return None;
        }
        let command = if self.playing {
            PlaybackCommand::Pause
        } else {
            PlaybackCommand::Play
        };
        self.playing = !self.playing;
        Some(command)
    }

    /// 直前の状態に関わらず再生中になる
    pub fn restart(&mut self, is_analyzing: bool) -> Option<PlaybackCommand> {
        if is_analyzing {
            return None;
        }
        self.playing = true;
        Some(PlaybackCommand::Restart)
    }

    /// 要素由来の再生/停止/終端にも追従する
    pub fn on_media_event(&mut self, event: MediaEvent) {
        self.playing = matches!(event, MediaEvent::Play);
    }

    pub fn reset(&mut self) {
        self.playing = false;
    }
}

pub struct PreviewController<B: PreviewBackend> {
    backend: B,
    current: Option<ActivePreview<B::Handle>>,
    playback: Playback,
}

impl<B: PreviewBackend> PreviewController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
            playback: Playback::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn current(&self) -> Option<&ActivePreview<B::Handle>> {
        self.current.as_ref()
    }

    /// 保持中のハンドル数（0 または 1）
    pub fn live_handles(&self) -> usize {
        usize::from(self.current.is_some())
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    /// 選択ファイルに合わせてハンドルを張り替える
    pub fn sync(&mut self, file: Option<&SelectedFile<B::Payload>>) -> PreviewChange {
        let next_id = file.map(SelectedFile::id);
        if let (Some(current), Some(next)) = (&self.current, next_id) {
            if current.file_id == next {
                return PreviewChange::Unchanged;
            }
        }
        if self.current.is_none() && file.is_none() {
            return PreviewChange::Unchanged;
        }

        // 取得より先に解放する
        self.release_current();

        let Some(file) = file else {
            return PreviewChange::Cleared;
        };

        match self.backend.acquire(file) {
            Ok(handle) => {
                tracing::debug!(file = %file.id(), name = file.name(), "preview acquired");
                self.current = Some(ActivePreview {
                    file_id: file.id(),
                    kind: file.preview_kind(),
                    handle,
                });
                PreviewChange::Replaced
            }
            Err(e) => {
                tracing::warn!(name = file.name(), error = %e, "preview unavailable");
                PreviewChange::Unavailable
            }
        }
    }

    /// アンマウント時の解放
    pub fn teardown(&mut self) {
        self.release_current();
    }

    /// 動画の場合のみコントロールを返す（解析中は無効）
    pub fn controls(&self, is_analyzing: bool) -> Option<PlaybackControls> {
        match self.current.as_ref()?.kind {
            MediaCategory::Video => Some(PlaybackControls {
                enabled: !is_analyzing,
                playing: self.playback.is_playing(),
            }),
            MediaCategory::Image => None,
        }
    }

    pub fn toggle_playback(&mut self, is_analyzing: bool) -> Option<PlaybackCommand> {
        if !self.has_video() {
            return None;
        }
        self.playback.toggle(is_analyzing)
    }

    pub fn restart(&mut self, is_analyzing: bool) -> Option<PlaybackCommand> {
        if !self.has_video() {
            return None;
        }
        self.playback.restart(is_analyzing)
    }

    pub fn on_media_event(&mut self, event: MediaEvent) {
        if self.has_video() {
            self.playback.on_media_event(event);
        }
    }

    /// 要素が再生要求を拒否した（自動再生ポリシー等）
    pub fn playback_rejected(&mut self) {
        if self.playback.is_playing() {
            tracing::debug!("play request rejected by media element");
        }
        self.playback.reset();
    }

    /// 解析中オーバーレイを表示するか
    pub fn show_overlay(&self, is_analyzing: bool) -> bool {
        is_analyzing && self.current.is_some()
    }

    fn has_video(&self) -> bool {
        matches!(
            self.current.as_ref().map(ActivePreview::kind),
            Some(MediaCategory::Video)
        )
    }

    fn release_current(&mut self) {
        if let Some(previous) = self.current.take() {
            tracing::debug!(file = %previous.file_id, "preview released");
            self.backend.release(previous.handle);
        }
        self.playback.reset();
    }
}

impl<B: PreviewBackend> Drop for PreviewController<B> {
    fn drop(&mut self) {
        self.release_current();
    }
}
