//! メディアプレビューコンポーネント
//!
//! 選択ファイルが変わるたびにオブジェクトURLを張り替え、
//! アンマウント時に残っているURLを失効させる。

use leptos::prelude::*;
use spermvision_common::{
    MediaCategory, MediaEvent, PlaybackCommand, PreviewController, SelectedFile,
};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlVideoElement;

use crate::app::WebSession;
use crate::object_url::ObjectUrlBackend;

type PreviewSignal = RwSignal<PreviewController<ObjectUrlBackend>>;

/// プレビュー下部に出すファイル名とサイズ
fn file_details<P>(file: &SelectedFile<P>) -> [String; 2] {
    [format!("File: {}", file.name()), format!("Size: {}", file.size_label())]
}

/// 再生要求が拒否されたら再生中フラグを戻す
fn request_play(video: &HtmlVideoElement, preview: PreviewSignal) {
    match video.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if JsFuture::from(promise).await.is_err() {
                preview.try_update(|p| p.playback_rejected());
            }
        }),
        Err(_) => preview.update(|p| p.playback_rejected()),
    }
}

fn apply_command(video: &HtmlVideoElement, command: PlaybackCommand, preview: PreviewSignal) {
    match command {
        PlaybackCommand::Play => request_play(video, preview),
        PlaybackCommand::Pause => {
            let _ = video.pause();
        }
        PlaybackCommand::Restart => {
            video.set_current_time(0.0);
            request_play(video, preview);
        }
    }
}

#[component]
pub fn MediaPreview(session: ReadSignal<WebSession, LocalStorage>) -> impl IntoView {
    let preview = RwSignal::new(PreviewController::new(ObjectUrlBackend::default()));
    let video_ref: NodeRef<leptos::html::Video> = NodeRef::new();
    let is_analyzing = move || session.with(|s| s.is_analyzing());

    // 選択ファイルの同一性に追従
    Effect::new(move |_| {
        let file = session.with(|s| s.selected().cloned());
        preview.update(|p| {
            p.sync(file.as_ref());
        });
    });

    on_cleanup(move || {
        preview.try_update(|p| p.teardown());
    });

    // URLと種別が変わったときだけ要素を作り直す
    let media = Memo::new(move |_| {
        preview.with(|p| p.current().map(|a| (a.handle().clone(), a.kind())))
    });

    let show_overlay = move || {
        let analyzing = is_analyzing();
        preview.with(|p| p.show_overlay(analyzing))
    };

    let overlay = move || {
        show_overlay().then(|| {
            view! {
                <div class="preview-overlay">
                    <div class="spinner"></div>
                    <p>"Analyzing frames..."</p>
                </div>
            }
        })
    };

    let toggle = move || {
        let analyzing = session.with_untracked(|s| s.is_analyzing());
        let mut command = None;
        preview.update(|p| command = p.toggle_playback(analyzing));
        if let (Some(command), Some(video)) = (command, video_ref.get()) {
            apply_command(&video, command, preview);
        }
    };

    let restart = move || {
        let analyzing = session.with_untracked(|s| s.is_analyzing());
        let mut command = None;
        preview.update(|p| command = p.restart(analyzing));
        if let (Some(command), Some(video)) = (command, video_ref.get()) {
            apply_command(&video, command, preview);
        }
    };

    let on_media_event = move |event: MediaEvent| preview.update(|p| p.on_media_event(event));

    let controls = move || {
        let analyzing = is_analyzing();
        preview.with(|p| p.controls(analyzing)).map(|c| {
            view! {
                <div class="playback-controls">
                    <button
                        class="btn btn-secondary"
                        disabled=!c.enabled
                        on:click=move |_| toggle()
                    >
                        {if c.playing { "Pause" } else { "Play" }}
                    </button>
                    <button
                        class="btn btn-secondary"
                        disabled=!c.enabled
                        on:click=move |_| restart()
                    >
                        "Restart"
                    </button>
                </div>
            }
        })
    };

    let details = move || {
        session.with(|s| s.selected().map(file_details)).map(|[name, size]| {
            view! {
                <div class="preview-details text-muted">
                    <p>{name}</p>
                    <p>{size}</p>
                </div>
            }
        })
    };

    view! {
        <div class="preview-card">
            <h2>"Media Preview"</h2>
            {move || match media.get() {
                None => view! {
                    <div class="preview-empty">
                        <p class="text-muted">"No media selected"</p>
                    </div>
                }
                .into_any(),
                Some((url, MediaCategory::Image)) => view! {
                    <div class="preview-frame">
                        <img src=url alt="Selected media" />
                        {overlay}
                    </div>
                    {details}
                }
                .into_any(),
                Some((url, MediaCategory::Video)) => view! {
                    <div class="preview-frame">
                        <video
                            node_ref=video_ref
                            src=url
                            on:play=move |_| on_media_event(MediaEvent::Play)
                            on:pause=move |_| on_media_event(MediaEvent::Pause)
                            on:ended=move |_| on_media_event(MediaEvent::Ended)
                        />
                        {overlay}
                    </div>
                    {controls}
                    {details}
                }
                .into_any(),
            }}
        </div>
    }
}
