//! 解析開始ボタン

use leptos::prelude::*;

use crate::app::WebSession;

/// ファイル選択中のみ表示し、Ready 以外では押せない
#[component]
pub fn AnalyzeButton<F>(
    session: ReadSignal<WebSession, LocalStorage>,
    on_analyze: F,
) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    let has_file = move || session.with(|s| s.selected().is_some());
    let is_analyzing = move || session.with(|s| s.is_analyzing());

    view! {
        <Show when=has_file>
            <div class="analyze-row">
                <button
                    class="btn btn-primary btn-analyze"
                    disabled=move || !session.with(|s| s.can_analyze())
                    on:click={
                        let on_analyze = on_analyze.clone();
                        move |_| on_analyze()
                    }
                >
                    {move || if is_analyzing() { "Analyzing..." } else { "Start Analysis" }}
                </button>
            </div>
        </Show>
    }
}
