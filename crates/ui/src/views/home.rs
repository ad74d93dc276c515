use dioxus::prelude::*;
use dioxus_router::Link;
use services::ProfileServiceError;

use crate::context::{AppContext, CurrentSession};
use crate::routes::Route;
use crate::views::{ErrorNotice, ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    DEFAULT_VIEWPORT_WIDTH, ProgressCardVm, columns_for_width, filter_progress_cards, greeting,
    map_progress_cards, visible_count,
};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    greeting: String,
    ongoing: Vec<ProgressCardVm>,
    completed: Vec<ProgressCardVm>,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let CurrentSession(session) = use_context::<CurrentSession>();
    let progress = ctx.progress();
    let profiles = ctx.profiles();
    let mut search = use_signal(String::new);
    let mut expanded = use_signal(|| false);
    let mut width = use_signal(|| DEFAULT_VIEWPORT_WIDTH);

    let resource = use_resource(move || {
        let progress = progress.clone();
        let profiles = profiles.clone();
        let session = session();
        async move {
            let session = session.ok_or_else(ViewError::not_authenticated)?;
            let overview = progress.overview(Some(&session)).await?;
            let profile = match profiles.get_profile(&session.user_id).await {
                Ok(profile) => Some(profile),
                Err(ProfileServiceError::NotFound(_)) => None,
                Err(err) => return Err(err.into()),
            };
            Ok::<_, ViewError>(HomeData {
                greeting: greeting(profile.as_ref(), &session.email),
                ongoing: map_progress_cards(&overview.ongoing),
                completed: map_progress_cards(&overview.completed),
            })
        }
    });

    let state = view_state_from_resource(resource);
    let columns = columns_for_width(width());
    let grid_style = format!("grid-template-columns: repeat({columns}, minmax(0, 1fr));");

    rsx! {
        div {
            class: "page home-page",
            onresize: move |evt: Event<ResizeData>| {
                if let Ok(size) = evt.get_content_box_size() {
                    width.set(size.width);
                }
            },
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorNotice { error: err }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(data) => {
                    let ongoing = filter_progress_cards(&data.ongoing, &search.read());
                    let shown = visible_count(columns, expanded(), ongoing.len());
                    let has_more = ongoing.len() > columns * 2;
                    rsx! {
                        header { class: "view-header",
                            h2 { class: "view-title", "{data.greeting}" }
                            input {
                                class: "search",
                                r#type: "search",
                                placeholder: "Search your courses",
                                value: "{search}",
                                oninput: move |evt| search.set(evt.value()),
                            }
                        }
                        section { class: "home-section",
                            h3 { "Ongoing Courses" }
                            if ongoing.is_empty() {
                                p { class: "muted", "No ongoing courses." }
                            } else {
                                div { class: "course-grid", style: "{grid_style}",
                                    for card in ongoing.into_iter().take(shown) {
                                        ProgressCard { key: "{card.id}", card }
                                    }
                                }
                                if has_more {
                                    button {
                                        class: "btn btn-link",
                                        r#type: "button",
                                        onclick: move |_| expanded.set(!expanded()),
                                        if expanded() { "Show Less" } else { "Show More" }
                                    }
                                }
                            }
                        }
                        section { class: "home-section",
                            h3 { "Completed Courses" }
                            if data.completed.is_empty() {
                                p { class: "muted", "No completed courses yet." }
                            } else {
                                div { class: "course-grid", style: "{grid_style}",
                                    for card in data.completed {
                                        ProgressCard { key: "{card.id}", card }
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
fn ProgressCard(card: ProgressCardVm) -> Element {
    rsx! {
        Link {
            class: "course-card",
            to: Route::CourseDetails { course_id: card.id.clone() },
            if let Some(src) = card.image.as_ref() {
                img { class: "course-card-image", src: "{src}", alt: "{card.name}" }
            }
            h4 { class: "course-card-name", "{card.name}" }
            progress { value: "{card.bar_value}", max: "1" }
            div { class: "course-card-stats",
                span { "{card.modules_label}" }
                span { "{card.percent_label}" }
            }
            if card.final_exam_left {
                span { class: "badge badge--exam", "Final exam left" }
            }
        }
    }
}
