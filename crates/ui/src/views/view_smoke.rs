use std::sync::Arc;

use skill_core::model::{Course, CourseId, ExamEntry, Module, ModuleId};
use storage::repository::{CatalogRepository, Storage, StorageError};

use super::test_harness::{
    ViewKind, guitar, learner, module_id, seeded_storage, setup_view_harness,
    setup_view_harness_with_storage,
};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_progress() {
    let mut harness = setup_view_harness(ViewKind::Home, Some(learner())).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Hello, ana@example.com"), "missing greeting in {html}");
    assert!(html.contains("Guitar"), "missing course in {html}");
    assert!(html.contains("2 / 3 modules"), "missing module count in {html}");
    assert!(html.contains("67%"), "missing percent in {html}");
    assert!(
        html.contains("No completed courses yet."),
        "missing empty completed section in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_without_session_prompts_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Home, None).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Please sign in to continue."), "missing prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn courses_view_smoke_lists_catalog_and_genres() {
    let mut harness = setup_view_harness(ViewKind::Courses, Some(learner())).await;
    harness.settle().await;
    let html = harness.render();
    for expected in ["Guitar", "Pottery", "Music", "Craft", "All"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn course_details_view_smoke_lists_modules() {
    let mut harness =
        setup_view_harness(ViewKind::CourseDetails(guitar()), Some(learner())).await;
    harness.settle().await;
    let html = harness.render();
    for expected in ["Chords", "Strumming", "Scales", "Not completed", "Take Exam"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(
        html.contains("2 / 3 modules completed"),
        "missing summary in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn course_join_view_smoke_offers_join() {
    let mut harness = setup_view_harness(
        ViewKind::CourseJoin(CourseId::new("pottery").unwrap()),
        Some(learner()),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Pottery"), "missing name in {html}");
    assert!(html.contains("Join Course"), "missing button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_course_renders_not_found() {
    let mut harness = setup_view_harness(
        ViewKind::CourseJoin(CourseId::new("missing").unwrap()),
        Some(learner()),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Course not found."), "missing not-found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_renders_completed_module() {
    let mut harness = setup_view_harness(
        ViewKind::Module(guitar(), module_id("m1")),
        Some(learner()),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    for expected in [
        "Chords",
        "You have completed this module.",
        "No content available.",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    for unexpected in ["Which chord?", "Submit Quiz"] {
        assert!(!html.contains(unexpected), "quiz offered again: {unexpected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_renders_open_module() {
    let mut harness = setup_view_harness(
        ViewKind::Module(guitar(), module_id("m3")),
        Some(learner()),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Scales"), "missing module name in {html}");
    assert!(
        !html.contains("You have completed this module."),
        "unexpected completion in {html}"
    );
    assert!(html.contains("Which chord?"), "missing question in {html}");
    assert!(html.contains("Submit Quiz"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_renders_questions() {
    let mut harness = setup_view_harness(ViewKind::Exam(guitar()), Some(learner())).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Final Exam"), "missing title in {html}");
    assert!(html.contains("Exam?"), "missing question in {html}");
    assert!(html.contains("Submit Exam"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_without_exam_data() {
    let mut harness = setup_view_harness(
        ViewKind::Exam(CourseId::new("pottery").unwrap()),
        Some(learner()),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No exam data found."), "missing message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_fields() {
    let mut harness = setup_view_harness(ViewKind::Profile, Some(learner())).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("ana@example.com"), "missing email in {html}");
    assert!(html.contains("via.placeholder.com"), "missing picture in {html}");
    assert!(html.contains("Save"), "missing save button in {html}");
}

struct OfflineCatalog;

#[async_trait::async_trait]
impl CatalogRepository for OfflineCatalog {
    async fn upsert_course(&self, _course: &Course) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn get_course(&self, _id: &CourseId) -> Result<Option<Course>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn upsert_module(&self, _module: &Module) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn get_module(
        &self,
        _course_id: &CourseId,
        _module_id: &ModuleId,
    ) -> Result<Option<Module>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn list_modules(&self, _course_id: &CourseId) -> Result<Vec<Module>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn upsert_exam_entry(
        &self,
        _course_id: &CourseId,
        _entry: &ExamEntry,
    ) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn list_exam_entries(
        &self,
        _course_id: &CourseId,
    ) -> Result<Vec<ExamEntry>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn courses_view_smoke_renders_error_state() {
    let seeded = seeded_storage().await;
    let storage = Storage {
        catalog: Arc::new(OfflineCatalog),
        ..seeded
    };
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Courses, Some(learner()), &storage).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
}
