//! 解析画面の状態機械
//!
//! 画面が唯一所有する状態（選択ファイル・解析中フラグ・直近の結果）と、その遷移。
//! ビュー側は読み取り専用で参照し、変更はここのメソッド経由でのみ行う。
//!
//! 模擬解析は [`AnalysisTicket`] として外部で実行され、完了時に
//! [`AnalysisSession::complete`] で結果が戻される。

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::notify::{Notification, Notifier};
use crate::types::{AnalysisResult, FileId, SelectedFile};
use serde::{Deserialize, Serialize};

/// 画面の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// ファイル未選択
    Idle,
    /// 選択済み・未解析
    Ready,
    /// 解析中
    Analyzing,
    /// 結果あり
    Done,
}

/// 解析中に別ファイルが選ばれた場合の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleResultPolicy {
    /// 実行中の解析は継続し、完了時の結果をそのまま反映する
    #[default]
    Apply,
    /// 選択変更で実行中の解析をキャンセルし、古い結果は捨てる
    Discard,
}

impl StaleResultPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaleResultPolicy::Apply => "apply",
            StaleResultPolicy::Discard => "discard",
        }
    }
}

/// 結果パネルの表示内容
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultView<'a> {
    Empty,
    /// 解析中プレースホルダ
    Analyzing,
    Ready(&'a AnalysisResult),
}

/// 実行中の解析1件
///
/// 開始時の選択ファイルIDを刻印し、キャンセルトークンを持つ。
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    id: u64,
    file_id: FileId,
    token: CancelToken,
}

impl AnalysisTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// `complete` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// 結果を保存した
    Stored,
    /// 失敗を通知した
    Failed,
    /// 古い・キャンセル済みのチケットなので無視した
    Ignored,
    /// 結果は届いたが保存しなかった（選択が変わった等）
    Discarded,
}

#[derive(Debug)]
pub struct AnalysisSession<P> {
    selected: Option<SelectedFile<P>>,
    in_flight: Option<AnalysisTicket>,
    result: Option<AnalysisResult>,
    policy: StaleResultPolicy,
    next_ticket: u64,
}

impl<P> Default for AnalysisSession<P> {
    fn default() -> Self {
        Self::new(StaleResultPolicy::default())
    }
}

impl<P> AnalysisSession<P> {
    pub fn new(policy: StaleResultPolicy) -> Self {
        Self {
            selected: None,
            in_flight: None,
            result: None,
            policy,
            next_ticket: 1,
        }
    }

    pub fn policy(&self) -> StaleResultPolicy {
        self.policy
    }

    pub fn selected(&self) -> Option<&SelectedFile<P>> {
        self.selected.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&AnalysisTicket> {
        self.in_flight.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::Analyzing
        } else if self.selected.is_none() {
            Phase::Idle
        } else if self.result.is_some() {
            Phase::Done
        } else {
            Phase::Ready
        }
    }

    pub fn result_view(&self) -> ResultView<'_> {
        if self.is_analyzing() {
            return ResultView::Analyzing;
        }
        match &self.result {
            Some(result) => ResultView::Ready(result),
            None => ResultView::Empty,
        }
    }

    /// 解析ボタンを押せるか（Ready のときのみ）
    pub fn can_analyze(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// 解除ボタンを押せるか
    pub fn can_remove(&self) -> bool {
        self.selected.is_some() && !self.is_analyzing()
    }

    /// 選択ファイルを置き換える（`None` で解除）
    ///
    /// 保存済みの結果は必ず破棄する。実行中の解析の扱いはポリシー次第だが、
    /// 解除（`None`）は常に解析を打ち切って Idle に戻す。
    pub fn select_file(&mut self, file: Option<SelectedFile<P>>) {
        match &file {
            Some(f) => tracing::info!(
                file = %f.id(),
                name = f.name(),
                size = f.size(),
                "file selected"
            ),
            None => tracing::info!("file removed"),
        }

        self.result = None;
        self.selected = file;

        if self.selected.is_none() || self.policy == StaleResultPolicy::Discard {
            self.cancel_analysis();
        }
    }

    /// 解析開始
    ///
    /// ファイル未選択なら警告を1件通知して何もしない。
    /// Ready 以外（解析中・結果あり）からの呼び出しは何もしない。
    pub fn trigger_analyze<N: Notifier>(&mut self, notifier: &mut N) -> Option<AnalysisTicket> {
        let Some(file) = &self.selected else {
            tracing::warn!("analyze requested without a file");
            notifier.notify(Notification::no_file_selected());
            return None;
        };

        if self.phase() != Phase::Ready {
            tracing::debug!(phase = ?self.phase(), "analyze ignored outside Ready");
            return None;
        }

        let ticket = AnalysisTicket {
            id: self.next_ticket,
            file_id: file.id(),
            token: CancelToken::new(),
        };
        self.next_ticket += 1;
        self.result = None;
        self.in_flight = Some(ticket.clone());

        tracing::info!(ticket = ticket.id, file = %ticket.file_id, "analysis started");
        Some(ticket)
    }

    /// 実行中の解析をキャンセルして Ready に戻す
    pub fn cancel_analysis(&mut self) -> bool {
        match self.in_flight.take() {
            Some(ticket) => {
                ticket.token.cancel();
                tracing::info!(ticket = ticket.id, "analysis cancelled");
                true
            }
            None => false,
        }
    }

    /// 解析の完了（成功・失敗）を反映する
    pub fn complete<N: Notifier>(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: Result<AnalysisResult>,
        notifier: &mut N,
    ) -> Completion {
        let current = self.in_flight.as_ref().map(AnalysisTicket::id);
        if current != Some(ticket.id) || ticket.is_cancelled() {
            tracing::debug!(ticket = ticket.id, "completion for inactive ticket ignored");
            return Completion::Ignored;
        }
        self.in_flight = None;

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(ticket = ticket.id, error = %e, "analysis failed");
                self.result = None;
                notifier.notify(Notification::analysis_failed());
                return Completion::Failed;
            }
        };

        let Some(selected) = &self.selected else {
            // 結果は選択ファイルがある場合にのみ存在できる
            tracing::debug!(ticket = ticket.id, "result dropped: no file selected");
            return Completion::Discarded;
        };

        if selected.id() != ticket.file_id {
            match self.policy {
                StaleResultPolicy::Discard => {
                    tracing::debug!(ticket = ticket.id, "stale result discarded");
                    return Completion::Discarded;
                }
                StaleResultPolicy::Apply => {
                    tracing::warn!(
                        ticket = ticket.id,
                        started_for = %ticket.file_id,
                        current = %selected.id(),
                        "applying result started for a previous file"
                    );
                }
            }
        }

        tracing::info!(
            ticket = ticket.id,
            sperm_count = result.sperm_count,
            confidence = ?result.confidence,
            "analysis complete"
        );
        notifier.notify(Notification::analysis_complete(&result));
        self.result = Some(result);
        Completion::Stored
    }
}
