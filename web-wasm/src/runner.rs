//! ブラウザ版の模擬解析実行
//!
//! 待機は `gloo` のタイマーで行い、完了時にトークンを確認する。

use gloo::timers::future::TimeoutFuture;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spermvision_common::{AnalysisResult, AnalysisTicket, MockAnalyzer, Result};

pub struct WebRunner {
    analyzer: MockAnalyzer,
    rng: StdRng,
}

impl WebRunner {
    pub fn new(analyzer: MockAnalyzer) -> Self {
        Self {
            analyzer,
            rng: StdRng::seed_from_u64(browser_seed()),
        }
    }

    /// 1回分の待機時間と結果を決め、待機後の結果を返すフューチャを作る
    ///
    /// キャンセル済みなら `None`。
    pub fn start(
        &mut self,
        ticket: &AnalysisTicket,
    ) -> impl std::future::Future<Output = Option<Result<AnalysisResult>>> + 'static {
        let run = self.analyzer.plan(&mut self.rng);
        let token = ticket.token().clone();
        let millis = u32::try_from(run.delay.as_millis()).unwrap_or(u32::MAX);

        async move {
            TimeoutFuture::new(millis).await;
            if token.is_cancelled() {
                None
            } else {
                Some(run.outcome)
            }
        }
    }
}

/// `Math.random()` と現在時刻からシードを作る
fn browser_seed() -> u64 {
    let random = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let now = js_sys::Date::now() as u64;
    (random << 32) ^ now
}
