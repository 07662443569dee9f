//! Loading placeholders.

use dioxus::prelude::*;

use crate::i18n::use_i18n;

#[component]
pub fn Spinner(#[props(default = "".to_string())] class: String) -> Element {
    rsx! {
        span { class: "spinner {class}", aria_hidden: "true" }
    }
}

/// Centered spinner with a "Loading..." caption, for whole-page loads.
#[component]
pub fn PageLoader() -> Element {
    let i18n = use_i18n();
    rsx! {
        div {
            class: "page-loader",
            Spinner {}
            p { {i18n.t("common.loading")} }
        }
    }
}

/// Grey placeholder rows shaped like the table that is loading.
#[component]
pub fn TableSkeleton(#[props(default = 5)] rows: usize, #[props(default = 4)] columns: usize) -> Element {
    rsx! {
        div {
            class: "table-skeleton",
            for row in 0..rows {
                div {
                    key: "{row}",
                    class: "table-skeleton__row",
                    for col in 0..columns {
                        span { key: "{col}", class: "skeleton skeleton--cell" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn CardSkeleton() -> Element {
    rsx! {
        div {
            class: "card card--skeleton",
            span { class: "skeleton skeleton--title" }
            span { class: "skeleton skeleton--line" }
            span { class: "skeleton skeleton--line skeleton--short" }
        }
    }
}
