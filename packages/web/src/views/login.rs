//! Login page view.

use api::LoginRequest;
use dioxus::prelude::*;
use ui::{error_text, use_auth, use_i18n, LanguageSelector, Spinner};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let i18n = use_i18n();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    // If already logged in, go to the dashboard
    if auth.state().is_authenticated() {
        nav.replace(Route::Dashboard {});
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let auth = auth.clone();
        async move {
            let (user, pass) = (username().trim().to_string(), password());
            if user.is_empty() || pass.is_empty() {
                error.set(Some(i18n.t("login.missing_credentials").to_string()));
                return;
            }
            error.set(None);
            submitting.set(true);
            match auth.login(LoginRequest::new(user, pass)).await {
                Ok(_) => {
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    error.set(Some(error_text(&i18n, &e)));
                    submitting.set(false);
                }
            }
        }
    };

    rsx! {
        div {
            class: "login",
            div {
                class: "login__card",
                div { class: "login__locale", LanguageSelector {} }
                h1 { class: "login__title", {i18n.t("app.title")} }
                p { class: "login__subtitle", {i18n.t("login.subtitle")} }

                form {
                    class: "login__form",
                    onsubmit: onsubmit,

                    if let Some(message) = error() {
                        div { class: "form-error", role: "alert", "{message}" }
                    }

                    div {
                        class: "form-field",
                        label { r#for: "login-username", {i18n.t("login.username")} }
                        input {
                            id: "login-username",
                            r#type: "text",
                            autocomplete: "username",
                            value: username(),
                            disabled: submitting(),
                            oninput: move |evt: FormEvent| username.set(evt.value()),
                        }
                    }
                    div {
                        class: "form-field",
                        label { r#for: "login-password", {i18n.t("login.password")} }
                        input {
                            id: "login-password",
                            r#type: "password",
                            autocomplete: "current-password",
                            value: password(),
                            disabled: submitting(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn--primary btn--block",
                        disabled: submitting(),
                        if submitting() {
                            Spinner { class: "spinner--small" }
                            {i18n.t("login.signing_in")}
                        } else {
                            {i18n.t("login.submit")}
                        }
                    }
                }
            }
        }
    }
}
