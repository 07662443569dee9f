//! Error display: inline messages and the page-level fallback.

use api::ApiError;
use dioxus::prelude::*;

use crate::browser;
use crate::i18n::{use_i18n, I18n};
use crate::icons::{FaHouse, FaRotateRight, FaTriangleExclamation};
use crate::Icon;

/// Localized text for an error a view could not recover from.
///
/// Server-provided messages (validation, not found, other statuses) are shown
/// verbatim; transport and decoding failures get the generic load-failed text.
pub fn error_text(i18n: &I18n, error: &ApiError) -> String {
    match error {
        ApiError::Network(_) | ApiError::Decode(_) => i18n.t("error.load_failed").to_string(),
        ApiError::Upload(api::UploadError::TooLarge { max_size_mb }) => {
            i18n.t_with("upload.too_large", &[("size", &max_size_mb.to_string())])
        }
        ApiError::Upload(api::UploadError::NotAllowed { accept }) => {
            i18n.t_with("upload.not_allowed", &[("accept", accept)])
        }
        other => other.to_string(),
    }
}

/// Inline error box with an optional retry button.
#[component]
pub fn ErrorMessage(message: String, #[props(default)] on_retry: Option<EventHandler<()>>) -> Element {
    let i18n = use_i18n();

    rsx! {
        div {
            class: "error-message",
            role: "alert",
            Icon { icon: FaTriangleExclamation, width: 16, height: 16 }
            p { class: "error-message__text", "{message}" }
            if let Some(on_retry) = on_retry {
                button {
                    class: "btn btn--outline btn--small",
                    onclick: move |_| on_retry.call(()),
                    Icon { icon: FaRotateRight, width: 12, height: 12 }
                    {i18n.t("common.retry")}
                }
            }
        }
    }
}

/// Page-level boundary: any render error below it shows a generic failure with
/// reload and home actions instead of a blank page.
#[component]
pub fn AppErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |_: ErrorContext| {
                tracing::error!("Render failure caught by the page boundary");
                rsx! { PageFailure {} }
            },
            {children}
        }
    }
}

#[component]
fn PageFailure() -> Element {
    let i18n = use_i18n();

    rsx! {
        div {
            class: "page-failure",
            Icon { icon: FaTriangleExclamation, width: 32, height: 32 }
            h2 { {i18n.t("error.page_title")} }
            p { {i18n.t("error.page_body")} }
            div {
                class: "page-failure__actions",
                button {
                    class: "btn btn--primary",
                    onclick: move |_| browser::reload(),
                    Icon { icon: FaRotateRight, width: 14, height: 14 }
                    {i18n.t("error.reload")}
                }
                button {
                    class: "btn btn--outline",
                    onclick: move |_| browser::redirect("/"),
                    Icon { icon: FaHouse, width: 14, height: 14 }
                    {i18n.t("error.go_home")}
                }
            }
        }
    }
}
