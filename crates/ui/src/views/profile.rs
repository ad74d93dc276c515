use dioxus::prelude::*;
use skill_core::model::UserProfile;

use crate::context::{AppContext, CurrentSession};
use crate::views::{ErrorNotice, ViewError, ViewState, view_state_from_resource};
use crate::vm::ProfileFormVm;

#[derive(Clone, Debug, PartialEq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
    Error(ViewError),
}

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let CurrentSession(session) = use_context::<CurrentSession>();
    let profiles = ctx.profiles();

    let resource = use_resource(move || {
        let profiles = profiles.clone();
        let session = session();
        async move {
            let session = session.ok_or_else(ViewError::not_authenticated)?;
            Ok::<UserProfile, ViewError>(profiles.get_profile(&session.user_id).await?)
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page profile-page",
            h2 { class: "view-title", "Profile" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorNotice { error: err }
                },
                ViewState::Ready(profile) => rsx! {
                    ProfileForm { profile }
                },
            }
        }
    }
}

#[component]
fn ProfileForm(profile: UserProfile) -> Element {
    let ctx = use_context::<AppContext>();
    let initial = ProfileFormVm::from_profile(&profile);
    let mut saved = use_signal(move || profile);
    let mut form = use_signal(move || initial);
    let mut save_state = use_signal(|| SaveState::Idle);

    let on_save = move |_| {
        if save_state() == SaveState::Saving {
            return;
        }
        let profiles = ctx.profiles();
        let original = saved.read().clone();
        let update = form.read().to_update(&original);
        save_state.set(SaveState::Saving);
        spawn(async move {
            match profiles.update_profile(original.id(), update).await {
                Ok(updated) => {
                    form.set(ProfileFormVm::from_profile(&updated));
                    saved.set(updated);
                    save_state.set(SaveState::Saved);
                }
                Err(err) => save_state.set(SaveState::Error(err.into())),
            }
        });
    };

    let current = saved.read().clone();
    let values = form.read().clone();
    let saving = save_state() == SaveState::Saving;

    rsx! {
        div { class: "profile-card",
            img { class: "avatar", src: "{current.profile_picture()}", alt: "{current.name()}" }
            p { class: "muted", "{current.email()}" }
        }
        div { class: "profile-form",
            label { r#for: "name", "Name" }
            input {
                id: "name",
                value: "{values.name}",
                oninput: move |evt| form.write().name = evt.value(),
            }
            label { r#for: "picture", "Profile picture URL" }
            input {
                id: "picture",
                value: "{values.profile_picture}",
                oninput: move |evt| form.write().profile_picture = evt.value(),
            }
            label { r#for: "phone", "Phone number" }
            input {
                id: "phone",
                r#type: "tel",
                value: "{values.phone_number}",
                oninput: move |evt| form.write().phone_number = evt.value(),
            }
            label { r#for: "address", "Address" }
            textarea {
                id: "address",
                value: "{values.address}",
                oninput: move |evt| form.write().address = evt.value(),
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: saving,
                onclick: on_save,
                if saving { "Saving..." } else { "Save" }
            }
            match save_state() {
                SaveState::Saved => rsx! {
                    p { class: "notice notice--success", "Profile saved." }
                },
                SaveState::Error(err) => rsx! {
                    ErrorNotice { error: err }
                },
                SaveState::Idle | SaveState::Saving => rsx! {},
            }
        }
    }
}
