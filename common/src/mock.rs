//! 模擬解析（実際の推論の代わりに、ランダムな遅延の後ランダムな結果を返す）
//!
//! 待機そのものは実行環境に任せる（CLIは tokio、ブラウザは gloo タイマー）。
//! ここでは乱数源を受け取り、待機時間と結果をまとめた [`MockRun`] を作るだけ。

use crate::error::{Error, Result};
use crate::types::{AnalysisResult, ImageQuality};
use rand::Rng;
use std::time::Duration;

pub const DEFAULT_MIN_DELAY_MS: u64 = 3000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 5000;

const SPERM_COUNT_MIN: u32 = 10;
const SPERM_COUNT_MAX: u32 = 209;
const CONFIDENCE_MIN: f64 = 85.0;
const CONFIDENCE_MAX: f64 = 95.0;
const ANALYSIS_TIME_MIN: f64 = 2.5;
const ANALYSIS_TIME_MAX: f64 = 4.5;
/// 小数1桁に丸めた後の上限（半開区間を保つ）
const ANALYSIS_TIME_CAP: f64 = 4.4;

/// 1回分の模擬解析
#[derive(Debug)]
pub struct MockRun {
    pub delay: Duration,
    pub outcome: Result<AnalysisResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockAnalyzer {
    min_delay_ms: u64,
    max_delay_ms: u64,
    failure_rate: f64,
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self {
            min_delay_ms: DEFAULT_MIN_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            failure_rate: 0.0,
        }
    }
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 待機時間の範囲 [min, max) を変更
    pub fn with_delay_range(mut self, min_delay_ms: u64, max_delay_ms: u64) -> Result<Self> {
        if min_delay_ms >= max_delay_ms {
            return Err(Error::Config(format!(
                "delay range must be non-empty: {}..{}",
                min_delay_ms, max_delay_ms
            )));
        }
        self.min_delay_ms = min_delay_ms;
        self.max_delay_ms = max_delay_ms;
        Ok(self)
    }

    /// 失敗させる確率 [0, 1]
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&failure_rate) {
            return Err(Error::Config(format!(
                "failure rate must be within [0, 1]: {}",
                failure_rate
            )));
        }
        self.failure_rate = failure_rate;
        Ok(self)
    }

    pub fn delay_range_ms(&self) -> (u64, u64) {
        (self.min_delay_ms, self.max_delay_ms)
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// 待機時間と結果を決める
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> MockRun {
        let delay = Duration::from_millis(rng.random_range(self.min_delay_ms..self.max_delay_ms));
        let result = generate_result(rng);

        let outcome = if self.failure_rate > 0.0 && rng.random_bool(self.failure_rate) {
            Err(Error::Analysis("simulated detector failure".to_string()))
        } else {
            Ok(result)
        };

        tracing::debug!(
            delay_ms = delay.as_millis() as u64,
            ok = outcome.is_ok(),
            "mock analysis planned"
        );
        MockRun { delay, outcome }
    }
}

/// 結果レコードを生成
pub fn generate_result<R: Rng + ?Sized>(rng: &mut R) -> AnalysisResult {
    let sperm_count = rng.random_range(SPERM_COUNT_MIN..=SPERM_COUNT_MAX);
    let confidence = rng.random_range(CONFIDENCE_MIN..CONFIDENCE_MAX).round() as u8;
    let raw_time = rng.random_range(ANALYSIS_TIME_MIN..ANALYSIS_TIME_MAX);
    let analysis_time = round_tenths(raw_time).min(ANALYSIS_TIME_CAP);
    let image_quality = ImageQuality::ALL[rng.random_range(0..ImageQuality::ALL.len())];

    AnalysisResult {
        sperm_count,
        confidence: Some(confidence),
        analysis_time: Some(analysis_time),
        image_quality: Some(image_quality),
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
