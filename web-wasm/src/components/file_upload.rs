//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップと参照ダイアログで単一のメディアファイルを選ぶ。
//! 選択状態そのものは持たず、結果は `on_select` で上位へ渡す。

use leptos::prelude::*;
use spermvision_common::{
    selector::file_icon_kind, FileSelector, MediaCategory, SelectedFile, Selection, ACCEPT_FILTER,
    SUPPORTED_FORMATS,
};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, File, FileList, HtmlInputElement};

use crate::app::WebSession;

/// `web_sys::File` から選択ファイルを作る
pub fn to_selected(file: File) -> SelectedFile<File> {
    SelectedFile::new(file.name(), file.size() as u64, file.type_(), file)
}

fn collect_files(list: FileList) -> Vec<SelectedFile<File>> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(to_selected)
        .collect()
}

#[component]
pub fn FileUpload<F>(
    session: ReadSignal<WebSession, LocalStorage>,
    on_select: F,
) -> impl IntoView
where
    F: Fn(Option<SelectedFile<File>>) + Clone + Send + Sync + 'static,
{
    let selector = RwSignal::new(FileSelector::new());
    let is_analyzing = move || session.with(|s| s.is_analyzing());

    let emit = {
        let on_select = on_select.clone();
        move |selection: Option<Selection<File>>| {
            if let Some(selection) = selection {
                on_select(selection.into_file());
            }
        }
    };

    let on_drop = {
        let emit = emit.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            let files = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .map(collect_files)
                .unwrap_or_default();

            let mut selection = None;
            selector.update(|s| selection = s.drop_files(files));
            emit(selection);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !selector.with_untracked(|s| s.is_drag_over()) {
            selector.update(|s| s.drag_enter());
        }
    };

    let on_dragleave = move |_: DragEvent| {
        selector.update(|s| s.drag_leave());
    };

    let on_change = {
        let emit = emit.clone();
        move |ev: Event| {
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let file = input.files().and_then(|list| list.get(0)).map(to_selected);
            // 同じファイルを選び直しても change が発火するように
            input.set_value("");
            emit(selector.with_untracked(|s| s.browse(file)));
        }
    };

    let on_remove = move || {
        let (has_file, analyzing) =
            session.with_untracked(|s| (s.selected().is_some(), s.is_analyzing()));
        emit(selector.with_untracked(|s| s.remove::<File>(has_file, analyzing)));
    };

    let selected_info = move || {
        session.with(|s| {
            s.selected()
                .map(|f| (f.name().to_string(), f.size_label(), file_icon_kind(f)))
        })
    };

    let area_class = move || {
        let mut classes = vec!["upload-area"];
        if selector.with(|s| s.is_drag_over()) {
            classes.push("dragover");
        }
        if selected_info().is_some() {
            classes.push("has-file");
        }
        if is_analyzing() {
            classes.push("processing");
        }
        classes.join(" ")
    };

    view! {
        <div class="upload-card">
            <div
                class=area_class
                on:drop=on_drop
                on:dragenter=on_dragover
                on:dragover=on_dragover
                on:dragleave=on_dragleave
            >
                {move || match selected_info() {
                    Some((name, size, kind)) => {
                        let on_remove = on_remove.clone();
                        let icon = match kind {
                            MediaCategory::Video => "🎞",
                            MediaCategory::Image => "🖼",
                        };
                        view! {
                            <div class="file-info">
                                <div class="file-icon">{icon}</div>
                                <h3 class="file-name">{name}</h3>
                                <p class="text-muted">{size}</p>
                                <button
                                    class="btn btn-outline"
                                    disabled=is_analyzing
                                    on:click=move |_| on_remove()
                                >
                                    "✕ Remove File"
                                </button>
                            </div>
                        }
                        .into_any()
                    }
                    None => {
                        let on_change = on_change.clone();
                        view! {
                            <div class="upload-prompt">
                                <div class="upload-icon">"⬆"</div>
                                <h3>"Upload Media for Analysis"</h3>
                                <p class="text-muted">
                                    "Drag and drop your video or image file, or click to browse"
                                </p>
                                <p class="text-muted text-small">
                                    {format!("Supported formats: {}", SUPPORTED_FORMATS)}
                                </p>
                                <input
                                    type="file"
                                    id="file-upload"
                                    class="hidden"
                                    accept=ACCEPT_FILTER
                                    on:change=on_change
                                />
                                <label for="file-upload" class="btn btn-primary">
                                    "Select File"
                                </label>
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
