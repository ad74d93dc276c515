use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skill_core::model::{
    Completion, CompletionTarget, Course, CourseId, Enrollment, EnrollmentBatch, ExamEntry,
    ExamEntryId, Module, ModuleId, UserId, UserProfile,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read access to the course catalog (`courses/{id}`, `courses/{id}/modul`,
/// `courses/{id}/exam`). Writes exist for seeding only.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Persist or replace a course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the course cannot be stored.
    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError>;

    /// Fetch a course by ID. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_course(&self, id: &CourseId) -> Result<Option<Course>, StorageError>;

    /// All courses ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures or malformed rows.
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;

    /// Persist or replace a module. The owning course must exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the course is missing.
    async fn upsert_module(&self, module: &Module) -> Result<(), StorageError>;

    /// Fetch one module of a course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures or malformed rows.
    async fn get_module(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
    ) -> Result<Option<Module>, StorageError>;

    /// Modules of a course ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures or malformed rows.
    async fn list_modules(&self, course_id: &CourseId) -> Result<Vec<Module>, StorageError>;

    /// Persist or replace a final-exam entry. The owning course must exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the course is missing.
    async fn upsert_exam_entry(
        &self,
        course_id: &CourseId,
        entry: &ExamEntry,
    ) -> Result<(), StorageError>;

    /// Exam entries of a course ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures or malformed rows.
    async fn list_exam_entries(&self, course_id: &CourseId)
    -> Result<Vec<ExamEntry>, StorageError>;
}

/// Per-user progress documents (`users/{id}/courses/{id}` and its `modul`
/// sub-collection).
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Fetch the enrollment for a user/course pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_enrollment(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, StorageError>;

    /// All enrollments of a user ordered by course ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_enrollments(&self, user_id: &UserId) -> Result<Vec<Enrollment>, StorageError>;

    /// Write an enrollment and its seeded completion records as one atomic batch.
    ///
    /// Re-writing an existing enrollment replaces `joined_at`; completion flags
    /// already set to `true` (and the exam flag) are kept.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any part of the batch fails; nothing is written then.
    async fn write_enrollment(&self, batch: &EnrollmentBatch) -> Result<(), StorageError>;

    /// Set the enrollment's final-exam flag.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user has not joined the course.
    async fn mark_exam_completed(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), StorageError>;

    /// Completion records of a user within one course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_completions(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Vec<Completion>, StorageError>;

    /// Set a completion record to `true`, creating it if it was never seeded.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user has not joined the course.
    async fn mark_completed(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        target: &CompletionTarget,
    ) -> Result<(), StorageError>;
}

/// User profile documents (`users/{id}`).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create or replace a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn put_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;

    /// Fetch a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures or malformed rows.
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError>;

    /// Overwrite the editable fields of an existing profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the profile does not exist.
    async fn update_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;

    /// All profiles ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures or malformed rows.
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, StorageError>;
}

/// Persisted shape of a locally managed account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub email: String,
    pub user_id: UserId,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Credential store backing the local identity provider.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered.
    async fn insert_account(&self, account: &AccountRecord) -> Result<(), StorageError>;

    /// Look up an account by (normalised) email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn find_account(&self, email: &str) -> Result<Option<AccountRecord>, StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct ProgressState {
    enrollments: BTreeMap<(UserId, CourseId), Enrollment>,
    completions: BTreeMap<(UserId, CourseId, CompletionTarget), bool>,
}

#[derive(Default)]
struct CatalogState {
    courses: BTreeMap<CourseId, Course>,
    modules: BTreeMap<(CourseId, ModuleId), Module>,
    exam: BTreeMap<(CourseId, ExamEntryId), ExamEntry>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<Mutex<CatalogState>>,
    progress: Arc<Mutex<ProgressState>>,
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
    accounts: Arc<Mutex<HashMap<String, AccountRecord>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::Connection(e.to_string()))
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError> {
        let mut guard = lock(&self.catalog)?;
        guard.courses.insert(course.id().clone(), course.clone());
        Ok(())
    }

    async fn get_course(&self, id: &CourseId) -> Result<Option<Course>, StorageError> {
        let guard = lock(&self.catalog)?;
        Ok(guard.courses.get(id).cloned())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let guard = lock(&self.catalog)?;
        Ok(guard.courses.values().cloned().collect())
    }

    async fn upsert_module(&self, module: &Module) -> Result<(), StorageError> {
        let mut guard = lock(&self.catalog)?;
        if !guard.courses.contains_key(module.course_id()) {
            return Err(StorageError::NotFound);
        }
        guard.modules.insert(
            (module.course_id().clone(), module.id().clone()),
            module.clone(),
        );
        Ok(())
    }

    async fn get_module(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
    ) -> Result<Option<Module>, StorageError> {
        let guard = lock(&self.catalog)?;
        Ok(guard
            .modules
            .get(&(course_id.clone(), module_id.clone()))
            .cloned())
    }

    async fn list_modules(&self, course_id: &CourseId) -> Result<Vec<Module>, StorageError> {
        let guard = lock(&self.catalog)?;
        Ok(guard
            .modules
            .iter()
            .filter(|((course, _), _)| course == course_id)
            .map(|(_, module)| module.clone())
            .collect())
    }

    async fn upsert_exam_entry(
        &self,
        course_id: &CourseId,
        entry: &ExamEntry,
    ) -> Result<(), StorageError> {
        let mut guard = lock(&self.catalog)?;
        if !guard.courses.contains_key(course_id) {
            return Err(StorageError::NotFound);
        }
        guard.exam.insert(
            (course_id.clone(), entry.id.clone()),
            entry.clone(),
        );
        Ok(())
    }

    async fn list_exam_entries(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<ExamEntry>, StorageError> {
        let guard = lock(&self.catalog)?;
        Ok(guard
            .exam
            .iter()
            .filter(|((course, _), _)| course == course_id)
            .map(|(_, entry)| entry.clone())
            .collect())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryRepository {
    async fn get_enrollment(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, StorageError> {
        let guard = lock(&self.progress)?;
        Ok(guard
            .enrollments
            .get(&(user_id.clone(), course_id.clone()))
            .cloned())
    }

    async fn list_enrollments(&self, user_id: &UserId) -> Result<Vec<Enrollment>, StorageError> {
        let guard = lock(&self.progress)?;
        Ok(guard
            .enrollments
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .map(|(_, enrollment)| enrollment.clone())
            .collect())
    }

    async fn write_enrollment(&self, batch: &EnrollmentBatch) -> Result<(), StorageError> {
        // One guard covers the whole batch.
        let mut guard = lock(&self.progress)?;
        let key = (
            batch.enrollment.user_id.clone(),
            batch.enrollment.course_id.clone(),
        );
        let mut enrollment = batch.enrollment.clone();
        if let Some(existing) = guard.enrollments.get(&key) {
            enrollment.completed |= existing.completed;
        }
        guard.enrollments.insert(key, enrollment);

        for completion in &batch.completions {
            let entry = guard
                .completions
                .entry((
                    completion.user_id.clone(),
                    completion.course_id.clone(),
                    completion.target.clone(),
                ))
                .or_insert(false);
            *entry |= completion.completed;
        }
        Ok(())
    }

    async fn mark_exam_completed(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<(), StorageError> {
        let mut guard = lock(&self.progress)?;
        let enrollment = guard
            .enrollments
            .get_mut(&(user_id.clone(), course_id.clone()))
            .ok_or(StorageError::NotFound)?;
        enrollment.completed = true;
        Ok(())
    }

    async fn list_completions(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Vec<Completion>, StorageError> {
        let guard = lock(&self.progress)?;
        Ok(guard
            .completions
            .iter()
            .filter(|((user, course, _), _)| user == user_id && course == course_id)
            .map(|((user, course, target), completed)| Completion {
                user_id: user.clone(),
                course_id: course.clone(),
                target: target.clone(),
                completed: *completed,
            })
            .collect())
    }

    async fn mark_completed(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        target: &CompletionTarget,
    ) -> Result<(), StorageError> {
        let mut guard = lock(&self.progress)?;
        if !guard
            .enrollments
            .contains_key(&(user_id.clone(), course_id.clone()))
        {
            return Err(StorageError::NotFound);
        }
        guard.completions.insert(
            (user_id.clone(), course_id.clone(), target.clone()),
            true,
        );
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn put_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let mut guard = lock(&self.profiles)?;
        guard.insert(profile.id().clone(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError> {
        let guard = lock(&self.profiles)?;
        Ok(guard.get(user_id).cloned())
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let mut guard = lock(&self.profiles)?;
        let slot = guard.get_mut(profile.id()).ok_or(StorageError::NotFound)?;
        *slot = profile.clone();
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, StorageError> {
        let guard = lock(&self.profiles)?;
        let mut profiles: Vec<_> = guard.values().cloned().collect();
        profiles.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(profiles)
    }
}

#[async_trait]
impl AccountRepository for InMemoryRepository {
    async fn insert_account(&self, account: &AccountRecord) -> Result<(), StorageError> {
        let mut guard = lock(&self.accounts)?;
        if guard.contains_key(&account.email) {
            return Err(StorageError::Conflict);
        }
        guard.insert(account.email.clone(), account.clone());
        Ok(())
    }

    async fn find_account(&self, email: &str) -> Result<Option<AccountRecord>, StorageError> {
        let guard = lock(&self.accounts)?;
        Ok(guard.get(email).cloned())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn CatalogRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub accounts: Arc<dyn AccountRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            catalog: Arc::new(repo.clone()),
            enrollments: Arc::new(repo.clone()),
            profiles: Arc::new(repo.clone()),
            accounts: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::model::QuizQuestion;
    use skill_core::time::fixed_now;

    fn course(id: &str) -> Course {
        Course::new(CourseId::new(id).unwrap(), format!("Course {id}"), "", None, "").unwrap()
    }

    fn module(course: &str, id: &str) -> Module {
        Module::new(
            ModuleId::new(id).unwrap(),
            CourseId::new(course).unwrap(),
            format!("Module {id}"),
            None,
            Vec::new(),
        )
        .unwrap()
    }

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[tokio::test]
    async fn modules_are_scoped_to_their_course() {
        let repo = InMemoryRepository::new();
        repo.upsert_course(&course("a")).await.unwrap();
        repo.upsert_course(&course("b")).await.unwrap();
        repo.upsert_module(&module("a", "m2")).await.unwrap();
        repo.upsert_module(&module("a", "m1")).await.unwrap();
        repo.upsert_module(&module("b", "m1")).await.unwrap();

        let modules = repo.list_modules(&CourseId::new("a").unwrap()).await.unwrap();
        let ids: Vec<_> = modules.iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn module_for_missing_course_is_rejected() {
        let repo = InMemoryRepository::new();
        let err = repo.upsert_module(&module("nope", "m1")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn rewriting_enrollment_keeps_finished_flags() {
        let repo = InMemoryRepository::new();
        let course_id = CourseId::new("a").unwrap();
        let target = CompletionTarget::Module(ModuleId::new("m1").unwrap());
        let batch = EnrollmentBatch::seed(
            Enrollment::new(user(), course_id.clone(), fixed_now()),
            vec![ModuleId::new("m1").unwrap()],
            vec![ExamEntryId::new("e1").unwrap()],
        );
        repo.write_enrollment(&batch).await.unwrap();
        repo.mark_completed(&user(), &course_id, &target).await.unwrap();
        repo.mark_exam_completed(&user(), &course_id).await.unwrap();

        repo.write_enrollment(&batch).await.unwrap();

        let completions = repo.list_completions(&user(), &course_id).await.unwrap();
        assert_eq!(completions.len(), 2);
        let module_done = completions
            .iter()
            .find(|c| c.target == target)
            .map(|c| c.completed);
        assert_eq!(module_done, Some(true));
        let enrollment = repo.get_enrollment(&user(), &course_id).await.unwrap().unwrap();
        assert!(enrollment.completed);
    }

    #[tokio::test]
    async fn completion_requires_enrollment() {
        let repo = InMemoryRepository::new();
        let err = repo
            .mark_completed(
                &user(),
                &CourseId::new("a").unwrap(),
                &CompletionTarget::Module(ModuleId::new("m1").unwrap()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn exam_entries_round_trip() {
        let repo = InMemoryRepository::new();
        let course_id = CourseId::new("a").unwrap();
        repo.upsert_course(&course("a")).await.unwrap();
        let entry = ExamEntry::new(
            ExamEntryId::new("q1").unwrap(),
            QuizQuestion::new("Q", vec!["x".into(), "y".into()], 1).unwrap(),
        );
        repo.upsert_exam_entry(&course_id, &entry).await.unwrap();
        let entries = repo.list_exam_entries(&course_id).await.unwrap();
        assert_eq!(entries, vec![entry]);
    }

    #[tokio::test]
    async fn duplicate_account_is_a_conflict() {
        let repo = InMemoryRepository::new();
        let record = AccountRecord {
            email: "a@b.c".into(),
            user_id: user(),
            password_hash: "hash".into(),
            created_at: fixed_now(),
        };
        repo.insert_account(&record).await.unwrap();
        let err = repo.insert_account(&record).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }
}
