//! ヘッダーと機能紹介

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <span class="header-icon">"🔬"</span>
            <div>
                <h1>"SpermVision AI"</h1>
                <p class="text-muted">"Advanced sperm analysis powered by computer vision"</p>
            </div>
        </header>
    }
}

/// 画面下部の紹介カード（表示のみ）
#[component]
pub fn FeatureCards() -> impl IntoView {
    let cards = [
        (
            "🧠",
            "AI-Powered Detection",
            "Advanced YOLOv8 computer vision model for accurate sperm cell detection and counting",
        ),
        (
            "⚡",
            "Real-time Analysis",
            "Fast processing of video and image files with immediate results and confidence scores",
        ),
        (
            "🔬",
            "Clinical Grade",
            "Professional-grade analysis tools designed for research and medical applications",
        ),
    ];

    view! {
        <section class="feature-cards">
            {cards
                .into_iter()
                .map(|(icon, title, text)| {
                    view! {
                        <div class="card">
                            <div class="card-icon">{icon}</div>
                            <h3>{title}</h3>
                            <p class="text-muted">{text}</p>
                        </div>
                    }
                })
                .collect_view()}
        </section>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer text-muted">
            <p>
                "This application uses artificial intelligence for research purposes only. "
                "Results should not replace professional medical evaluation."
            </p>
        </footer>
    }
}
