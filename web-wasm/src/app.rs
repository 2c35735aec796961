//! メインアプリケーションコンポーネント
//!
//! 解析セッション（選択ファイル・解析中フラグ・結果）を一か所で持ち、
//! 子コンポーネントには読み取り専用のシグナルとコールバックだけを渡す。

use leptos::prelude::*;
use spermvision_common::{AnalysisSession, MockAnalyzer, SelectedFile, StaleResultPolicy};
use web_sys::File;

use crate::components::{
    analysis_results::AnalysisResults,
    analyze_button::AnalyzeButton,
    file_upload::FileUpload,
    header::{FeatureCards, Footer, Header},
    media_preview::MediaPreview,
    toaster::{Toaster, Toasts},
};
use crate::runner::WebRunner;

/// ブラウザ版の解析セッション（`web_sys::File` は Send でないためローカル保持）
pub type WebSession = AnalysisSession<File>;

#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new_local(WebSession::new(StaleResultPolicy::Apply));
    let toasts = Toasts::new();
    let runner = StoredValue::new(WebRunner::new(MockAnalyzer::new()));

    // ファイル選択ハンドラ
    let on_select = move |file: Option<SelectedFile<File>>| {
        session.update(|s| s.select_file(file));
    };

    // 解析開始ハンドラ
    let on_analyze = move || {
        let mut sink = toasts;
        let mut ticket = None;
        session.update(|s| ticket = s.trigger_analyze(&mut sink));
        let Some(ticket) = ticket else {
            return;
        };

        let mut pending = None;
        runner.update_value(|r| pending = Some(r.start(&ticket)));
        let Some(pending) = pending else {
            return;
        };

        wasm_bindgen_futures::spawn_local(async move {
            let Some(outcome) = pending.await else {
                return;
            };
            let mut sink = toasts;
            session.try_update(|s| {
                s.complete(&ticket, outcome, &mut sink);
            });
        });
    };

    view! {
        <div class="app">
            <Header />
            <main class="container">
                <FeatureCards />
                <div class="analysis-grid">
                    <div class="column">
                        <FileUpload session=session.read_only() on_select=on_select />
                        <AnalyzeButton session=session.read_only() on_analyze=on_analyze />
                    </div>
                    <div class="column">
                        <MediaPreview session=session.read_only() />
                        <AnalysisResults session=session.read_only() />
                    </div>
                </div>
                <Footer />
            </main>
            <Toaster toasts=toasts />
        </div>
    }
}
