//! 模擬解析の実行（tokio）
//!
//! 待機中も呼び出し側はブロックされない。完了時の結果は
//! [`AnalysisScreen::complete`](crate::screen::AnalysisScreen::complete) で画面に戻す。

use rand::rngs::StdRng;
use rand::SeedableRng;
use spermvision_common::{AnalysisResult, AnalysisTicket, MockAnalyzer, Result};
use tokio::task::JoinHandle;

/// 解析タスクの戻り値（キャンセルされた場合は `None`）
pub type AnalysisOutput = Option<Result<AnalysisResult>>;

pub struct AnalysisRunner {
    analyzer: MockAnalyzer,
    rng: StdRng,
}

impl AnalysisRunner {
    /// `seed` を指定すると結果が再現可能になる
    pub fn new(analyzer: MockAnalyzer, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { analyzer, rng }
    }

    pub fn analyzer(&self) -> &MockAnalyzer {
        &self.analyzer
    }

    /// チケットに対する模擬解析を起動する
    pub fn spawn(&mut self, ticket: &AnalysisTicket) -> JoinHandle<AnalysisOutput> {
        let run = self.analyzer.plan(&mut self.rng);
        let token = ticket.token().clone();
        let ticket_id = ticket.id();

        tokio::spawn(async move {
            tokio::time::sleep(run.delay).await;
            if token.is_cancelled() {
                tracing::debug!(ticket = ticket_id, "mock analysis cancelled before completion");
                return None;
            }
            Some(run.outcome)
        })
    }
}
