//! 解析結果パネル

use leptos::prelude::*;
use spermvision_common::{AnalysisResult, ResultView};

use crate::app::WebSession;

/// 表示用に所有権を持たせた結果パネルの状態
#[derive(Clone, PartialEq)]
enum Panel {
    Empty,
    Analyzing,
    Ready(AnalysisResult),
}

#[component]
pub fn AnalysisResults(session: ReadSignal<WebSession, LocalStorage>) -> impl IntoView {
    let panel = move || {
        session.with(|s| match s.result_view() {
            ResultView::Empty => Panel::Empty,
            ResultView::Analyzing => Panel::Analyzing,
            ResultView::Ready(result) => Panel::Ready(result.clone()),
        })
    };

    view! {
        <div class="results-card">
            <h2>"Analysis Results"</h2>
            {move || match panel() {
                Panel::Empty => view! {
                    <p class="text-muted">"Upload a file and start the analysis to see results."</p>
                }
                .into_any(),
                Panel::Analyzing => view! {
                    <div class="results-pending">
                        <div class="spinner"></div>
                        <p>"Processing your sample..."</p>
                    </div>
                }
                .into_any(),
                Panel::Ready(result) => {
                    let confidence = result
                        .confidence
                        .map(|c| format!("{}%", c))
                        .unwrap_or_else(|| "-".to_string());
                    let time = result
                        .analysis_time
                        .map(|t| format!("{:.1}s", t))
                        .unwrap_or_else(|| "-".to_string());
                    let quality = result.image_quality.map(|q| q.label()).unwrap_or("-");
                    view! {
                        <div class="results-grid">
                            <div class="metric metric-primary">
                                <span class="metric-label">"Sperm Count"</span>
                                <span class="metric-value">{result.sperm_count}</span>
                            </div>
                            <div class="metric">
                                <span class="metric-label">"Confidence"</span>
                                <span class="metric-value">{confidence}</span>
                            </div>
                            <div class="metric">
                                <span class="metric-label">"Analysis Time"</span>
                                <span class="metric-value">{time}</span>
                            </div>
                            <div class="metric">
                                <span class="metric-label">"Image Quality"</span>
                                <span class="metric-value">{quality}</span>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
