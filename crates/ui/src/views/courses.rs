use dioxus::prelude::*;
use dioxus_router::use_navigator;
use skill_core::model::{Course, CourseFilter, CourseId, genres};

use crate::context::{AppContext, CurrentSession};
use crate::views::{ErrorNotice, ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseCardVm, course_route, map_course_cards};

#[component]
pub fn CoursesView() -> Element {
    let ctx = use_context::<AppContext>();
    let CurrentSession(session) = use_context::<CurrentSession>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();
    let mut search = use_signal(String::new);
    let mut genre = use_signal(|| None::<String>);
    let mut open_error = use_signal(|| None::<ViewError>);

    let catalog_for_resource = catalog.clone();
    let resource = use_resource(move || {
        let catalog = catalog_for_resource.clone();
        async move { Ok::<Vec<Course>, ViewError>(catalog.list_courses().await?) }
    });

    let open_course = use_callback(move |course_id: CourseId| {
        let catalog = catalog.clone();
        let Some(current) = session() else {
            open_error.set(Some(ViewError::not_authenticated()));
            return;
        };
        spawn(async move {
            match catalog.is_enrolled(&current.user_id, &course_id).await {
                Ok(enrolled) => {
                    open_error.set(None);
                    let _ = navigator.push(course_route(course_id, enrolled));
                }
                Err(err) => open_error.set(Some(err.into())),
            }
        });
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page courses-page",
            header { class: "view-header",
                h2 { class: "view-title", "Courses" }
                input {
                    class: "search",
                    r#type: "search",
                    placeholder: "Search courses",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
            }
            if let Some(err) = open_error() {
                ErrorNotice { error: err }
            }
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
                ViewState::Ready(courses) => {
                    let filter = CourseFilter::search(search.read().clone()).with_genre(genre());
                    let cards = map_course_cards(&courses, &filter);
                    let chips = genres(&courses);
                    let selected = genre();
                    rsx! {
                        div { class: "genre-chips",
                            button {
                                class: if selected.is_none() { "chip chip--active" } else { "chip" },
                                r#type: "button",
                                onclick: move |_| genre.set(None),
                                "All"
                            }
                            for chip in chips {
                                GenreChip {
                                    key: "{chip}",
                                    active: selected.as_deref() == Some(chip.as_str()),
                                    label: chip.clone(),
                                    on_select: move |label: String| {
                                        let next = (genre().as_deref() != Some(label.as_str())).then_some(label);
                                        genre.set(next);
                                    },
                                }
                            }
                        }
                        if cards.is_empty() {
                            p { class: "muted", "No courses match that search." }
                        } else {
                            div { class: "course-list",
                                for card in cards {
                                    CourseCard {
                                        key: "{card.id}",
                                        card,
                                        on_open: open_course,
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn GenreChip(label: String, active: bool, on_select: EventHandler<String>) -> Element {
    let value = label.clone();
    rsx! {
        button {
            class: if active { "chip chip--active" } else { "chip" },
            r#type: "button",
            onclick: move |_| on_select.call(value.clone()),
            "{label}"
        }
    }
}

#[component]
fn CourseCard(card: CourseCardVm, on_open: EventHandler<CourseId>) -> Element {
    let course_id = card.id.clone();
    rsx! {
        button {
            class: "course-card",
            r#type: "button",
            onclick: move |_| on_open.call(course_id.clone()),
            if let Some(src) = card.image.as_ref() {
                img { class: "course-card-image", src: "{src}", alt: "{card.name}" }
            }
            h4 { class: "course-card-name", "{card.name}" }
            if let Some(genre) = card.genre.as_ref() {
                span { class: "badge", "{genre}" }
            }
            p { class: "course-card-description", "{card.description}" }
        }
    }
}
