use skill_core::model::{
    AnswerSheet, Course, CourseId, CourseStatus, ExamEntry, ExamEntryId, Module, ModuleId,
    QuestionKey, QuizQuestion,
};
use skill_core::time::fixed_now;
use services::{AppServices, AuthBackend, Clock};
use storage::repository::{CatalogRepository, Storage};
use storage::sqlite::SqliteRepository;

fn question(correct: usize) -> QuizQuestion {
    QuizQuestion::new("Pick one", vec!["a".into(), "b".into(), "c".into()], correct).unwrap()
}

async fn seed_catalog(storage: &Storage) -> CourseId {
    let course_id = CourseId::new("guitar").unwrap();
    let course = Course::new(course_id.clone(), "Guitar", "", Some("Music".into()), "").unwrap();
    storage.catalog.upsert_course(&course).await.unwrap();
    for id in ["a", "b", "c"] {
        let module = Module::new(
            ModuleId::new(id).unwrap(),
            course_id.clone(),
            format!("Module {id}"),
            None,
            vec![question(1), question(0), question(2)],
        )
        .unwrap();
        storage.catalog.upsert_module(&module).await.unwrap();
    }
    let entry = ExamEntry::new(ExamEntryId::new("final").unwrap(), question(0));
    storage
        .catalog
        .upsert_exam_entry(&course_id, &entry)
        .await
        .unwrap();
    course_id
}

#[tokio::test]
async fn register_join_study_and_finish_a_course() {
    let storage = Storage::sqlite("sqlite:file:memdb_learning_flow?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let course_id = seed_catalog(&storage).await;
    let app = AppServices::from_storage(&storage, Clock::fixed(fixed_now()), AuthBackend::Local);

    let session = app
        .auth()
        .register("ana@example.com", "secret1")
        .await
        .expect("register");
    let current = app.auth().current();
    let current = current.as_ref();

    let catalog = app.catalog();
    assert!(!catalog.is_enrolled(&session.user_id, &course_id).await.unwrap());
    catalog.enroll(&session.user_id, &course_id).await.unwrap();
    assert!(catalog.is_enrolled(&session.user_id, &course_id).await.unwrap());

    let assessment = app.assessment();
    let answers: AnswerSheet = [(0, 1), (1, 0), (2, 1)].into_iter().collect();
    for module in ["a", "b"] {
        let submission = assessment
            .submit_quiz(current, &course_id, &ModuleId::new(module).unwrap(), &answers)
            .await
            .unwrap();
        assert_eq!(submission.score.to_string(), "2 out of 3");
        assert!(submission.recorded());
    }

    let overview = app.progress().overview(current).await.unwrap();
    assert_eq!(overview.ongoing.len(), 1);
    let progress = &overview.ongoing[0];
    assert_eq!((progress.completed_modules, progress.total_modules), (2, 3));
    assert!(!progress.final_exam_left());

    assessment
        .submit_quiz(current, &course_id, &ModuleId::new("c").unwrap(), &AnswerSheet::new())
        .await
        .unwrap();
    let overview = app.progress().overview(current).await.unwrap();
    assert!(overview.ongoing[0].final_exam_left());

    let exam = assessment.load_exam(current, &course_id).await.unwrap();
    assert!(!exam.completed);
    let answers = AnswerSheet::new().with(QuestionKey::Entry(exam.entries[0].id.clone()), 0);
    let submission = assessment
        .submit_exam(current, &course_id, &answers)
        .await
        .unwrap();
    assert!(submission.score.is_perfect());

    let overview = app.progress().overview(current).await.unwrap();
    assert!(overview.ongoing.is_empty());
    assert_eq!(overview.completed.len(), 1);
    assert_eq!(overview.completed[0].status(), CourseStatus::Completed);

    let details = catalog.course_details(current, &course_id).await.unwrap();
    assert_eq!(details.completed_modules(), 3);
    assert!(details.exam_completed);

    let profile = app.profiles().get_profile(&session.user_id).await.unwrap();
    assert_eq!(profile.name(), "ana@example.com");
}

#[tokio::test]
async fn nameless_module_rows_do_not_break_joining_or_progress() {
    let url = "sqlite:file:memdb_nameless_module?mode=memory&cache=shared";
    let storage = Storage::sqlite(url).await.expect("connect sqlite");
    let course_id = seed_catalog(&storage).await;
    let raw = SqliteRepository::connect(url).await.expect("second connection");
    sqlx::query("INSERT INTO modules (course_id, id, name) VALUES ('guitar', 'z', '')")
        .execute(raw.pool())
        .await
        .unwrap();

    let app = AppServices::from_storage(&storage, Clock::fixed(fixed_now()), AuthBackend::Local);
    let session = app
        .auth()
        .register("bo@example.com", "secret1")
        .await
        .expect("register");
    let current = app.auth().current();
    let current = current.as_ref();

    app.catalog().enroll(&session.user_id, &course_id).await.unwrap();
    let details = app.catalog().course_details(current, &course_id).await.unwrap();
    let ids: Vec<_> = details.modules.iter().map(|m| m.module.id().as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    let overview = app.progress().overview(current).await.unwrap();
    assert_eq!(overview.ongoing.len(), 1);
    assert_eq!(overview.ongoing[0].total_modules, 3);
}

#[tokio::test]
async fn signed_out_user_sees_nothing_and_writes_nothing() {
    let app = AppServices::in_memory(Clock::fixed(fixed_now()));
    let overview = app.progress().overview(None).await.unwrap();
    assert!(overview.is_empty());

    let err = app
        .assessment()
        .submit_exam(None, &CourseId::new("guitar").unwrap(), &AnswerSheet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, services::AssessmentError::NotAuthenticated));
}

#[tokio::test]
async fn sqlite_services_start_signed_out_with_empty_catalog() {
    let app = AppServices::new_sqlite(
        "sqlite:file:memdb_fresh_services?mode=memory&cache=shared",
        Clock::fixed(fixed_now()),
        AuthBackend::Local,
    )
    .await
    .expect("open sqlite services");

    assert!(app.auth().current().is_none());
    assert!(app.catalog().list_courses().await.unwrap().is_empty());
    assert!(app.progress().overview(None).await.unwrap().is_empty());
}
