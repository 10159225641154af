use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, FormData, RequestInit, RequestMode, Response};

use crate::shared::api_utils::api_url;

/// Error payload the relay returns with a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// API client for usecase u101
///
/// Sends one multipart POST carrying the optional PDF and the optional
/// message text. Best effort: no retry, no timeout, no credentials.
pub async fn send_line_message(
    file: Option<web_sys::File>,
    message: &str,
) -> Result<(), String> {
    let window = window().ok_or("No window object")?;

    let form = FormData::new().map_err(|e| format!("Failed to create form data: {:?}", e))?;
    if let Some(file) = &file {
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| format!("Failed to append file: {:?}", e))?;
    }
    if !message.is_empty() {
        form.append_with_str("message", message)
            .map_err(|e| format!("Failed to append message: {:?}", e))?;
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    // The browser picks the multipart boundary; no Content-Type header here.
    opts.set_body(form.as_ref());

    let request =
        web_sys::Request::new_with_str_and_init(&api_url("/api/send-line-message/"), &opts)
            .map_err(|e| format!("Failed to create request: {:?}", e))?;

    let response_value =
        match wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request)).await {
            Ok(v) => v,
            Err(e) => {
                log::error!("送信エラー: {:?}", e);
                return Err("送信中にエラーが発生しました".to_string());
            }
        };

    let response: Response = response_value.dyn_into().map_err(|_| "Not a Response")?;

    if !response.ok() {
        let text = wasm_bindgen_futures::JsFuture::from(
            response
                .text()
                .unwrap_or_else(|_| js_sys::Promise::resolve(&JsValue::from_str(""))),
        )
        .await
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();

        log::error!("送信エラー: HTTP {} {}", response.status(), text);
        return Err(error_message_from_body(&text));
    }

    Ok(())
}

/// Map a non-2xx response body to the text shown in the failure dialog.
///
/// The relay is expected to answer with `{"message": "..."}`; that message
/// is surfaced verbatim. Anything else falls back to a generic string.
pub fn error_message_from_body(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.is_empty() => message,
        Ok(_) => "送信に失敗しました".to_string(),
        Err(_) => "通信エラーが発生しました".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_used_verbatim() {
        assert_eq!(
            error_message_from_body(r#"{"message": "quota exceeded"}"#),
            "quota exceeded"
        );
    }

    #[test]
    fn test_json_without_message_falls_back() {
        assert_eq!(
            error_message_from_body(r#"{"status": 500}"#),
            "送信に失敗しました"
        );
        assert_eq!(
            error_message_from_body(r#"{"message": ""}"#),
            "送信に失敗しました"
        );
        assert_eq!(
            error_message_from_body(r#"{"message": null}"#),
            "送信に失敗しました"
        );
    }

    #[test]
    fn test_unparseable_body_falls_back() {
        assert_eq!(
            error_message_from_body("<html>502 Bad Gateway</html>"),
            "通信エラーが発生しました"
        );
        assert_eq!(error_message_from_body(""), "通信エラーが発生しました");
    }
}
