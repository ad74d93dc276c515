use thiserror::Error;

use crate::model::ids::CourseId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course name cannot be empty")]
    EmptyName,
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A course in the catalog.
///
/// Courses are authored outside the app and treated as read-only reference data.
/// The image is a base64-encoded PNG as stored by the catalog; it may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    name: String,
    image: String,
    genre: Option<String>,
    description: String,
}

impl Course {
    /// Creates a new Course.
    ///
    /// Blank genres are normalised to `None`; the description is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyName` if name is empty or whitespace-only.
    pub fn new(
        id: CourseId,
        name: impl Into<String>,
        image: impl Into<String>,
        genre: Option<String>,
        description: impl Into<String>,
    ) -> Result<Self, CourseError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CourseError::EmptyName);
        }

        let genre = genre
            .map(|g| g.trim().to_owned())
            .filter(|g| !g.is_empty());

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            image: image.into(),
            genre,
            description: description.into().trim().to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base64 PNG payload, empty when the course has no picture.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// `data:` URI suitable for an `img` element, if the course has a picture.
    #[must_use]
    pub fn image_data_uri(&self) -> Option<String> {
        if self.image.is_empty() {
            None
        } else {
            Some(format!("data:image/png;base64,{}", self.image))
        }
    }
}

//
// ─── FILTER ────────────────────────────────────────────────────────────────────
//

/// Client-side catalog filter: free-text search plus an optional genre.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub search: String,
    pub genre: Option<String>,
}

impl CourseFilter {
    #[must_use]
    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            genre: None,
        }
    }

    #[must_use]
    pub fn with_genre(mut self, genre: Option<String>) -> Self {
        self.genre = genre;
        self
    }

    /// Case-insensitive substring match on the name; genre must match exactly
    /// (ignoring case) when one is selected.
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        let query = self.search.trim().to_lowercase();
        if !query.is_empty() && !course.name().to_lowercase().contains(&query) {
            return false;
        }
        match self.genre.as_deref() {
            None => true,
            Some(wanted) => course
                .genre()
                .is_some_and(|genre| genre.eq_ignore_ascii_case(wanted)),
        }
    }

    /// Returns the courses that match, preserving order.
    #[must_use]
    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Distinct genres across the given courses, sorted alphabetically.
#[must_use]
pub fn genres(courses: &[Course]) -> Vec<String> {
    let mut out: Vec<String> = courses
        .iter()
        .filter_map(|c| c.genre().map(str::to_owned))
        .collect();
    out.sort_by_key(|g| g.to_lowercase());
    out.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    out
}
