use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::{AppContext, CurrentSession};
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let initial = ctx.session();
    let mut session = use_signal(move || initial);
    use_context_provider(|| CurrentSession(session));

    let auth = ctx.auth();
    use_future(move || {
        let auth = auth.clone();
        async move {
            let mut rx = auth.subscribe();
            while rx.changed().await.is_ok() {
                let current = rx.borrow_and_update().clone();
                session.set(current);
            }
        }
    });

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Skill Lab" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
