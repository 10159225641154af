use super::api;
use crate::shared::file_utils::format_file_size;
use crate::shared::icons::icon;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

/// The only MIME type the drop zone accepts. The declared type of the
/// dropped file must match exactly; there is no sniffing.
const PDF_MIME: &str = "application/pdf";

fn accepts_mime(mime: &str) -> bool {
    mime == PDF_MIME
}

/// Submit is actionable only when something would actually be sent and no
/// request is already in flight.
fn can_submit(has_file: bool, message: &str, is_loading: bool) -> bool {
    (has_file || !message.trim().is_empty()) && !is_loading
}

/// Form for relaying a PDF and/or a text message into the LINE group.
#[component]
pub fn LineMessageUploader() -> impl IntoView {
    let (file_name, set_file_name) = signal(Option::<String>::None);
    let (file_size, set_file_size) = signal(0u64);
    let (message, set_message) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (is_dragging, set_is_dragging) = signal(false);

    // web_sys::File is a JS handle and not Send, so it lives outside the
    // reactive graph; file_name/file_size are its reactive face.
    let selected_file = StoredValue::new_local(Option::<web_sys::File>::None);

    let file_input_ref = NodeRef::<html::Input>::new();

    fn alert(msg: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(msg);
        }
    }

    // Maintenance notice. No reactive reads, so this fires once per mount.
    Effect::new(move || {
        alert("!! メンテナンス中につき、動作不安定 !!");
    });

    let take_file = move |file: web_sys::File| {
        set_file_name.set(Some(file.name()));
        set_file_size.set(file.size() as u64);
        selected_file.set_value(Some(file));
    };

    let handle_file_change = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());

        if let Some(input) = input {
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                take_file(file);
            }
        }
    };

    // Forward clicks on the zone to the hidden native input.
    let handle_upload_click = move |_| {
        if let Some(input) = file_input_ref.get() {
            input.click();
        }
    };

    let handle_remove_file = move |_| {
        selected_file.set_value(None);
        set_file_name.set(None);
        set_file_size.set(0);
        // Clearing the input value lets the same file be re-picked right away.
        if let Some(input) = file_input_ref.get() {
            input.set_value("");
        }
    };

    let handle_drag_over = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragging.set(true);
    };

    let handle_drag_leave = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragging.set(false);
    };

    let handle_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragging.set(false);

        let dropped = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));

        if let Some(file) = dropped {
            if accepts_mime(&file.type_()) {
                take_file(file);
            } else {
                alert("PDFファイルのみアップロード可能です。");
            }
        }
    };

    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let file = selected_file.get_value();
        let text = message.get_untracked();
        if !can_submit(file.is_some(), &text, is_loading.get_untracked()) {
            return;
        }

        set_is_loading.set(true);
        spawn_local(async move {
            match api::send_line_message(file, &text).await {
                Ok(()) => {
                    selected_file.set_value(None);
                    set_file_name.set(None);
                    set_file_size.set(0);
                    set_message.set(String::new());
                    alert("送信が完了しました");
                }
                Err(e) => {
                    // On failure the form keeps its state so the user can retry.
                    alert(&e);
                }
            }
            // Runs on both paths; the button must never stay disabled.
            set_is_loading.set(false);
        });
    };

    let submit_disabled =
        move || !can_submit(file_name.get().is_some(), &message.get(), is_loading.get());

    view! {
        <div class="page line-uploader">
            <div class="card line-uploader__card">
                <div class="card__header">
                    <h1 class="card__title">"LINEメッセージ_UPLOADER"</h1>
                </div>
                <div class="card__body">
                    <form class="line-uploader__form" on:submit=handle_submit>
                        <div class="form__group">
                            <label class="form__label">"PDFアップロード"</label>
                            {move || if file_name.get().is_none() {
                                view! {
                                    <div
                                        class=move || if is_dragging.get() {
                                            "line-uploader__dropzone line-uploader__dropzone--active"
                                        } else {
                                            "line-uploader__dropzone"
                                        }
                                        on:click=handle_upload_click
                                        on:dragover=handle_drag_over
                                        on:dragleave=handle_drag_leave
                                        on:drop=handle_drop
                                    >
                                        <div class="line-uploader__dropzone-inner">
                                            <span class="line-uploader__dropzone-icon">
                                                {icon("upload")}
                                            </span>
                                            <div class="line-uploader__dropzone-text">
                                                <span class="line-uploader__dropzone-link">"クリックしてファイルを選択"</span>
                                                <p>"またはドラッグ＆ドロップ"</p>
                                                <input
                                                    node_ref=file_input_ref
                                                    id="pdf-file-input"
                                                    type="file"
                                                    accept=".pdf"
                                                    class="hidden"
                                                    on:change=handle_file_change
                                                />
                                            </div>
                                            <p class="line-uploader__dropzone-hint">"PDFファイル（10MBまで）"</p>
                                        </div>
                                    </div>
                                }.into_any()
                            } else {
                                view! {
                                    <div class="line-uploader__preview">
                                        <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                                            <div class="line-uploader__preview-file">
                                                <span class="line-uploader__preview-icon">{icon("file")}</span>
                                                <div>
                                                    <p class="line-uploader__preview-name">
                                                        {move || file_name.get().unwrap_or_default()}
                                                    </p>
                                                    <p class="line-uploader__preview-size">
                                                        {move || format_file_size(file_size.get())}
                                                    </p>
                                                </div>
                                            </div>
                                            <button
                                                type="button"
                                                class="line-uploader__remove"
                                                on:click=handle_remove_file
                                            >
                                                {icon("x")}
                                            </button>
                                        </Flex>
                                    </div>
                                }.into_any()
                            }}
                        </div>

                        <div class="form__group">
                            <label class="form__label" for="line-message-input">"メッセージ（任意）"</label>
                            <textarea
                                id="line-message-input"
                                class="form__textarea line-uploader__message"
                                placeholder="メッセージを入力してください..."
                                rows=5
                                prop:value=move || message.get()
                                on:input=move |ev| set_message.set(event_target_value(&ev))
                            ></textarea>
                        </div>

                        <button
                            type="submit"
                            class="button button--primary line-uploader__submit"
                            prop:disabled=submit_disabled
                        >
                            {move || if is_loading.get() {
                                view! {
                                    <Space gap=SpaceGap::Small>
                                        <Spinner />
                                        <span>"送信中..."</span>
                                    </Space>
                                }.into_any()
                            } else {
                                view! { "LINEグループに送信" }.into_any()
                            }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_accepts_only_pdf() {
        assert!(accepts_mime("application/pdf"));
        assert!(!accepts_mime("application/x-pdf"));
        assert!(!accepts_mime("image/png"));
        assert!(!accepts_mime("text/plain"));
        assert!(!accepts_mime(""));
    }

    #[test]
    fn test_submit_requires_payload() {
        assert!(!can_submit(false, "", false));
        assert!(!can_submit(false, "   ", false));
        assert!(can_submit(true, "", false));
        assert!(can_submit(false, "hello", false));
        assert!(can_submit(true, "hello", false));
    }

    #[test]
    fn test_submit_blocked_while_loading() {
        assert!(!can_submit(true, "", true));
        assert!(!can_submit(false, "hello", true));
        assert!(!can_submit(false, "", true));
    }
}
