use crate::usecases::u101_send_line_message::view::LineMessageUploader;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <LineMessageUploader />
    }
}
