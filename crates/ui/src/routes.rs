use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use skill_core::model::{CourseId, ModuleId};

use crate::context::{AppContext, CurrentSession};
use crate::views::{
    CourseDetailsView, CourseJoinView, CoursesView, ExamView, HomeView, LoginView, ModuleView,
    ProfileView, RegisterView,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login", LoginView)] Login {},
    #[route("/register", RegisterView)] Register {},
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/courses", CoursesView)] Courses {},
        #[route("/courses/:course_id/join", CourseJoinView)] CourseJoin { course_id: CourseId },
        #[route("/courses/:course_id", CourseDetailsView)] CourseDetails { course_id: CourseId },
        #[route("/courses/:course_id/modules/:module_id", ModuleView)] Module { course_id: CourseId, module_id: ModuleId },
        #[route("/courses/:course_id/exam", ExamView)] Exam { course_id: CourseId },
        #[route("/profile", ProfileView)] Profile {},
}

/// Signed-in shell. Sends anonymous users to the login screen.
#[component]
fn Layout() -> Element {
    let CurrentSession(session) = use_context::<CurrentSession>();
    let navigator = use_navigator();

    use_effect(move || {
        if session.read().is_none() {
            let _ = navigator.replace(Route::Login {});
        }
    });

    if session.read().is_none() {
        return rsx! {
            p { class: "muted", "Redirecting to sign in..." }
        };
    }

    rsx! {
        div { class: "app",
            NavBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn NavBar() -> Element {
    let ctx = use_context::<AppContext>();
    let mut signing_out = use_signal(|| false);

    let on_sign_out = move |_| {
        let auth = ctx.auth();
        signing_out.set(true);
        spawn(async move {
            if let Err(err) = auth.logout().await {
                tracing::error!(error = %err, "sign-out failed");
            }
            signing_out.set(false);
        });
    };

    rsx! {
        nav { class: "navbar",
            h1 { "Skill Lab" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Courses {}, "Courses" } }
                li { Link { to: Route::Profile {}, "Profile" } }
            }
            button {
                class: "btn btn-secondary",
                disabled: signing_out(),
                onclick: on_sign_out,
                "Sign out"
            }
        }
    }
}
