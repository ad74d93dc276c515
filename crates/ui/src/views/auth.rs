use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorNotice, ViewError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

#[derive(Clone, Debug, PartialEq)]
enum SubmitState {
    Idle,
    Submitting,
    Error(ViewError),
}

#[component]
pub fn LoginView() -> Element {
    rsx! { AuthForm { mode: AuthMode::Login } }
}

#[component]
pub fn RegisterView() -> Element {
    rsx! { AuthForm { mode: AuthMode::Register } }
}

#[component]
fn AuthForm(mode: AuthMode) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submit_state = use_signal(|| SubmitState::Idle);

    let (title, action_label) = match mode {
        AuthMode::Login => ("Sign in", "Login"),
        AuthMode::Register => ("Create account", "Register"),
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submit_state() == SubmitState::Submitting {
            return;
        }
        let auth = ctx.auth();
        let email = email.read().clone();
        let password = password.read().clone();
        submit_state.set(SubmitState::Submitting);
        spawn(async move {
            let result = match mode {
                AuthMode::Login => auth.login(&email, &password).await,
                AuthMode::Register => auth.register(&email, &password).await,
            };
            match result {
                Ok(_) => {
                    submit_state.set(SubmitState::Idle);
                    let _ = navigator.replace(Route::Home {});
                }
                Err(err) => submit_state.set(SubmitState::Error(err.into())),
            }
        });
    };

    let submitting = submit_state() == SubmitState::Submitting;

    rsx! {
        div { class: "page auth-page",
            h2 { class: "view-title", "{title}" }
            form { class: "auth-form", onsubmit: on_submit,
                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting,
                    if submitting { "Please wait..." } else { "{action_label}" }
                }
            }
            if let SubmitState::Error(err) = submit_state() {
                ErrorNotice { error: err }
            }
            match mode {
                AuthMode::Login => rsx! {
                    p { class: "muted",
                        "No account yet? "
                        Link { to: Route::Register {}, "Register" }
                    }
                },
                AuthMode::Register => rsx! {
                    p { class: "muted",
                        "Already registered? "
                        Link { to: Route::Login {}, "Sign in" }
                    }
                },
            }
        }
    }
}
