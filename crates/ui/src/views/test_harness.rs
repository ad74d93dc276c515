use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AppServices, AssessmentService, AuthBackend, AuthService, CatalogService, Clock,
    ProfileService, ProgressService,
};
use skill_core::model::{
    CompletionTarget, Course, CourseId, Enrollment, EnrollmentBatch, ExamEntry, ExamEntryId,
    Module, ModuleId, QuizQuestion, Session, UserId,
};
use skill_core::time::fixed_now;
use storage::repository::{CatalogRepository, EnrollmentRepository, Storage};

use crate::context::{CurrentSession, UiApp, build_app_context};
use crate::views::{
    CourseDetailsView, CourseJoinView, CoursesView, ExamView, HomeView, ModuleView, ProfileView,
};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn assessment(&self) -> Arc<AssessmentService> {
        self.services.assessment()
    }

    fn profiles(&self) -> Arc<ProfileService> {
        self.services.profiles()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Courses,
    CourseJoin(CourseId),
    CourseDetails(CourseId),
    Module(CourseId, ModuleId),
    Exam(CourseId),
    Profile,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session: Option<Session>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    let initial = props.session.clone();
    let session = use_signal(move || initial);
    use_context_provider(|| CurrentSession(session));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Courses => rsx! { CoursesView {} },
        ViewKind::CourseJoin(course_id) => rsx! { CourseJoinView { course_id } },
        ViewKind::CourseDetails(course_id) => rsx! { CourseDetailsView { course_id } },
        ViewKind::Module(course_id, module_id) => rsx! { ModuleView { course_id, module_id } },
        ViewKind::Exam(course_id) => rsx! { ExamView { course_id } },
        ViewKind::Profile => rsx! { ProfileView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    /// First render plus enough polling for in-memory resources to settle.
    pub async fn settle(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn learner() -> Session {
    Session::new(UserId::new("u1").unwrap(), "ana@example.com")
}

pub fn guitar() -> CourseId {
    CourseId::new("guitar").unwrap()
}

pub fn module_id(id: &str) -> ModuleId {
    ModuleId::new(id).unwrap()
}

fn question(text: &str, correct: usize) -> QuizQuestion {
    QuizQuestion::new(text, vec!["A".into(), "B".into(), "C".into()], correct).unwrap()
}

/// Catalog with "Guitar" (three modules, two-question exam) and "Pottery"
/// (no modules, no exam). The learner is enrolled in Guitar and has finished
/// two modules.
pub async fn seeded_storage() -> Storage {
    let storage = Storage::in_memory();
    let catalog = &storage.catalog;

    catalog
        .upsert_course(
            &Course::new(guitar(), "Guitar", "", Some("Music".into()), "Six strings.").unwrap(),
        )
        .await
        .unwrap();
    catalog
        .upsert_course(
            &Course::new(
                CourseId::new("pottery").unwrap(),
                "Pottery",
                "",
                Some("Craft".into()),
                "Clay.",
            )
            .unwrap(),
        )
        .await
        .unwrap();

    for (id, name) in [("m1", "Chords"), ("m2", "Strumming"), ("m3", "Scales")] {
        let module = Module::new(
            module_id(id),
            guitar(),
            name,
            None,
            vec![question("Which chord?", 1), question("Which string?", 0)],
        )
        .unwrap();
        catalog.upsert_module(&module).await.unwrap();
    }
    for (id, correct) in [("e1", 0), ("e2", 2)] {
        catalog
            .upsert_exam_entry(
                &guitar(),
                &ExamEntry::new(ExamEntryId::new(id).unwrap(), question("Exam?", correct)),
            )
            .await
            .unwrap();
    }

    let user = learner().user_id;
    let batch = EnrollmentBatch::seed(
        Enrollment::new(user.clone(), guitar(), fixed_now()),
        ["m1", "m2", "m3"].into_iter().map(module_id),
        [ExamEntryId::new("e1").unwrap(), ExamEntryId::new("e2").unwrap()],
    );
    storage.enrollments.write_enrollment(&batch).await.unwrap();
    for id in ["m1", "m2"] {
        storage
            .enrollments
            .mark_completed(&user, &guitar(), &CompletionTarget::Module(module_id(id)))
            .await
            .unwrap();
    }
    storage
}

pub async fn setup_view_harness(view: ViewKind, session: Option<Session>) -> ViewHarness {
    let storage = seeded_storage().await;
    setup_view_harness_with_storage(view, session, &storage).await
}

pub async fn setup_view_harness_with_storage(
    view: ViewKind,
    session: Option<Session>,
    storage: &Storage,
) -> ViewHarness {
    let services = AppServices::from_storage(storage, Clock::fixed(fixed_now()), AuthBackend::Local);
    if let Some(session) = session.as_ref() {
        services.profiles().provision(session).await.unwrap();
    }

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
            session,
        },
    );
    ViewHarness { dom }
}
