//! 解析画面（CLI版）
//!
//! ファイル選択・プレビュー・状態機械・通知をまとめて持ち、
//! 選択の反映とプレビューの張り替えを必ず一緒に行う。

use crate::media::DiskFile;
use crate::preview::FileHandleBackend;
use spermvision_common::{
    AnalysisResult, AnalysisSession, AnalysisTicket, Completion, FileSelector, MediaEvent,
    Notification, PlaybackCommand, PreviewController, Selection, StaleResultPolicy,
};
use std::path::PathBuf;

pub struct AnalysisScreen {
    session: AnalysisSession<PathBuf>,
    selector: FileSelector,
    preview: PreviewController<FileHandleBackend>,
    notifications: Vec<Notification>,
}

impl AnalysisScreen {
    pub fn new(policy: StaleResultPolicy) -> Self {
        Self {
            session: AnalysisSession::new(policy),
            selector: FileSelector::new(),
            preview: PreviewController::new(FileHandleBackend::default()),
            notifications: Vec::new(),
        }
    }

    pub fn session(&self) -> &AnalysisSession<PathBuf> {
        &self.session
    }

    pub fn preview(&self) -> &PreviewController<FileHandleBackend> {
        &self.preview
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// 表示済みの通知を取り出す
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// ドロップ（最初の動画・画像のみ採用）。採用されたら true
    pub fn drop_files(&mut self, files: Vec<DiskFile>) -> bool {
        self.selector.drag_enter();
        match self.selector.drop_files(files) {
            Some(selection) => {
                self.apply(selection);
                true
            }
            None => false,
        }
    }

    /// 参照ダイアログでの選択
    pub fn browse(&mut self, file: Option<DiskFile>) -> bool {
        match self.selector.browse(file) {
            Some(selection) => {
                self.apply(selection);
                true
            }
            None => false,
        }
    }

    /// 解除ボタン
    pub fn remove(&mut self) -> bool {
        let has_file = self.session.selected().is_some();
        match self.selector.remove(has_file, self.session.is_analyzing()) {
            Some(selection) => {
                self.apply(selection);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, selection: Selection<PathBuf>) {
        self.session.select_file(selection.into_file());
        self.preview.sync(self.session.selected());
    }

    pub fn trigger_analyze(&mut self) -> Option<AnalysisTicket> {
        self.session.trigger_analyze(&mut self.notifications)
    }

    pub fn complete(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: spermvision_common::Result<AnalysisResult>,
    ) -> Completion {
        self.session.complete(ticket, outcome, &mut self.notifications)
    }

    pub fn cancel_analysis(&mut self) -> bool {
        self.session.cancel_analysis()
    }

    pub fn toggle_playback(&mut self) -> Option<PlaybackCommand> {
        let analyzing = self.session.is_analyzing();
        self.preview.toggle_playback(analyzing)
    }

    pub fn restart_playback(&mut self) -> Option<PlaybackCommand> {
        let analyzing = self.session.is_analyzing();
        self.preview.restart(analyzing)
    }

    pub fn on_media_event(&mut self, event: MediaEvent) {
        self.preview.on_media_event(event);
    }

    /// 画面を閉じる（プレビューを解放）
    pub fn teardown(&mut self) {
        self.preview.teardown();
    }
}
