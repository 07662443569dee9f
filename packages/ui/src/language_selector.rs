use dioxus::prelude::*;

use crate::i18n::{use_i18n, Locale};
use crate::icons::FaGlobe;
use crate::Icon;

/// Header dropdown switching between the supported languages.
#[component]
pub fn LanguageSelector() -> Element {
    let mut i18n = use_i18n();
    let current = i18n.locale();

    rsx! {
        label {
            class: "language-selector",
            title: i18n.t("header.language"),
            Icon { icon: FaGlobe, width: 14, height: 14 }
            select {
                value: current.code(),
                onchange: move |evt| {
                    if let Some(locale) = Locale::from_code(&evt.value()) {
                        i18n.set_locale(locale);
                    }
                },
                for locale in Locale::ALL {
                    option {
                        key: "{locale.code()}",
                        value: locale.code(),
                        selected: *locale == current,
                        {locale.native_name()}
                    }
                }
            }
        }
    }
}
