use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use skill_core::model::{
    CompletionTarget, CourseProgress, Enrollment, ProgressOverview, Session, UserId,
};
use storage::repository::{CatalogRepository, EnrollmentRepository, StorageError};
use tracing::debug;

use crate::error::ProgressError;

/// Derives ongoing/completed course status from completion records.
#[derive(Clone)]
pub struct ProgressService {
    catalog: Arc<dyn CatalogRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            catalog,
            enrollments,
        }
    }

    /// Snapshot of every enrolled course, split into ongoing and completed.
    ///
    /// Without a session the overview is empty. Enrollments whose course no
    /// longer exists are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if any read fails.
    pub async fn overview(
        &self,
        session: Option<&Session>,
    ) -> Result<ProgressOverview, ProgressError> {
        let Some(session) = session else {
            return Ok(ProgressOverview::default());
        };

        let enrollments = self.enrollments.list_enrollments(&session.user_id).await?;
        let results = join_all(
            enrollments
                .iter()
                .map(|enrollment| self.course_progress(&session.user_id, enrollment)),
        )
        .await;

        let mut entries = Vec::with_capacity(results.len());
        for result in results {
            if let Some(progress) = result? {
                entries.push(progress);
            }
        }

        let overview = ProgressOverview::partition(entries);
        debug!(
            user = %session.user_id,
            ongoing = overview.ongoing.len(),
            completed = overview.completed.len(),
            "computed progress overview"
        );
        Ok(overview)
    }

    async fn course_progress(
        &self,
        user_id: &UserId,
        enrollment: &Enrollment,
    ) -> Result<Option<CourseProgress>, StorageError> {
        let course_id = &enrollment.course_id;
        let (course, modules, completions) = futures::try_join!(
            self.catalog.get_course(course_id),
            self.catalog.list_modules(course_id),
            self.enrollments.list_completions(user_id, course_id),
        )?;
        let Some(course) = course else {
            debug!(course = %course_id, "skipping enrollment for missing course");
            return Ok(None);
        };

        let done: HashSet<_> = completions
            .iter()
            .filter(|c| c.completed)
            .filter_map(|c| match &c.target {
                CompletionTarget::Module(id) => Some(id),
                CompletionTarget::ExamEntry(_) => None,
            })
            .collect();
        let completed_modules = modules.iter().filter(|m| done.contains(m.id())).count();

        Ok(Some(CourseProgress::new(
            course,
            modules.len(),
            completed_modules,
            enrollment.completed,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::model::{
        Course, CourseId, CourseStatus, EnrollmentBatch, Module, ModuleId, ProgressFraction,
    };
    use skill_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    async fn seed_course(repo: &InMemoryRepository, id: &str, modules: &[&str]) -> CourseId {
        let course_id = CourseId::new(id).unwrap();
        repo.upsert_course(&Course::new(course_id.clone(), id, "", None, "").unwrap())
            .await
            .unwrap();
        for m in modules {
            let module = Module::new(
                ModuleId::new(*m).unwrap(),
                course_id.clone(),
                *m,
                None,
                Vec::new(),
            )
            .unwrap();
            repo.upsert_module(&module).await.unwrap();
        }
        course_id
    }

    async fn join(repo: &InMemoryRepository, user: &UserId, course_id: &CourseId) {
        let modules = repo.list_modules(course_id).await.unwrap();
        let batch = EnrollmentBatch::seed(
            Enrollment::new(user.clone(), course_id.clone(), fixed_now()),
            modules.iter().map(|m| m.id().clone()),
            Vec::new(),
        );
        repo.write_enrollment(&batch).await.unwrap();
    }

    async fn finish(repo: &InMemoryRepository, user: &UserId, course_id: &CourseId, module: &str) {
        repo.mark_completed(
            user,
            course_id,
            &CompletionTarget::Module(ModuleId::new(module).unwrap()),
        )
        .await
        .unwrap();
    }

    fn session() -> Session {
        Session::new(UserId::new("u1").unwrap(), "ana@example.com")
    }

    #[tokio::test]
    async fn no_session_yields_empty_overview() {
        let repo = InMemoryRepository::new();
        let svc = ProgressService::new(Arc::new(repo.clone()), Arc::new(repo));
        assert!(svc.overview(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn two_of_three_modules_is_ongoing() {
        let repo = InMemoryRepository::new();
        let user = session().user_id;
        let course_id = seed_course(&repo, "guitar", &["a", "b", "c"]).await;
        join(&repo, &user, &course_id).await;
        finish(&repo, &user, &course_id, "a").await;
        finish(&repo, &user, &course_id, "b").await;

        let svc = ProgressService::new(Arc::new(repo.clone()), Arc::new(repo));
        let overview = svc.overview(Some(&session())).await.unwrap();

        assert!(overview.completed.is_empty());
        assert_eq!(overview.ongoing.len(), 1);
        let progress = &overview.ongoing[0];
        assert_eq!((progress.completed_modules, progress.total_modules), (2, 3));
        match progress.fraction() {
            ProgressFraction::Ratio(r) => assert!((r - 2.0 / 3.0).abs() < 1e-9),
            ProgressFraction::NotApplicable => panic!("expected a ratio"),
        }
    }

    #[tokio::test]
    async fn modules_and_exam_complete_the_course() {
        let repo = InMemoryRepository::new();
        let user = session().user_id;
        let done = seed_course(&repo, "done", &["a"]).await;
        let exam_only = seed_course(&repo, "exam-only", &["a", "b"]).await;
        for course in [&done, &exam_only] {
            join(&repo, &user, course).await;
            repo.mark_exam_completed(&user, course).await.unwrap();
        }
        finish(&repo, &user, &done, "a").await;

        let svc = ProgressService::new(Arc::new(repo.clone()), Arc::new(repo));
        let overview = svc.overview(Some(&session())).await.unwrap();

        assert_eq!(overview.len(), 2);
        assert_eq!(overview.completed.len(), 1);
        assert_eq!(overview.completed[0].course.id(), &done);
        assert_eq!(overview.ongoing[0].status(), CourseStatus::Ongoing);
    }

    #[tokio::test]
    async fn enrollments_for_deleted_courses_are_skipped() {
        let repo = InMemoryRepository::new();
        let user = session().user_id;
        let batch = EnrollmentBatch::seed(
            Enrollment::new(user.clone(), CourseId::new("gone").unwrap(), fixed_now()),
            Vec::new(),
            Vec::new(),
        );
        repo.write_enrollment(&batch).await.unwrap();

        let svc = ProgressService::new(Arc::new(repo.clone()), Arc::new(repo));
        assert!(svc.overview(Some(&session())).await.unwrap().is_empty());
    }
}
