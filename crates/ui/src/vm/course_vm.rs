use services::CourseDetails;
use skill_core::model::{Course, CourseFilter, CourseId, ModuleId};

use crate::routes::Route;

/// Catalog entry on the courses screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: CourseId,
    pub name: String,
    pub genre: Option<String>,
    pub image: Option<String>,
    pub description: String,
}

/// A module row on the course details screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleRowVm {
    pub id: ModuleId,
    pub name: String,
    pub completed: bool,
    pub status_label: &'static str,
}

#[must_use]
pub fn map_course_cards(courses: &[Course], filter: &CourseFilter) -> Vec<CourseCardVm> {
    filter
        .apply(courses)
        .into_iter()
        .map(|course| CourseCardVm {
            id: course.id().clone(),
            name: course.name().to_string(),
            genre: course.genre().map(str::to_string),
            image: course.image_data_uri(),
            description: course.description().to_string(),
        })
        .collect()
}

#[must_use]
pub fn map_module_rows(details: &CourseDetails) -> Vec<ModuleRowVm> {
    details
        .modules
        .iter()
        .map(|status| ModuleRowVm {
            id: status.module.id().clone(),
            name: status.module.name().to_string(),
            completed: status.completed,
            status_label: if status.completed {
                "Completed"
            } else {
                "Not completed"
            },
        })
        .collect()
}

/// Enrolled users land on the course details, everyone else on the join prompt.
#[must_use]
pub fn course_route(course_id: CourseId, enrolled: bool) -> Route {
    if enrolled {
        Route::CourseDetails { course_id }
    } else {
        Route::CourseJoin { course_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::ModuleStatus;
    use skill_core::model::Module;

    fn course(id: &str, genre: Option<&str>) -> Course {
        Course::new(
            CourseId::new(id).unwrap(),
            id,
            "",
            genre.map(str::to_string),
            "About",
        )
        .unwrap()
    }

    #[test]
    fn filter_narrows_cards() {
        let courses = vec![
            course("guitar", Some("Music")),
            course("piano", Some("Music")),
            course("pottery", Some("Craft")),
        ];
        let filter = CourseFilter::search("P").with_genre(Some("Music".into()));
        let cards = map_course_cards(&courses, &filter);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "piano");
        assert_eq!(cards[0].genre.as_deref(), Some("Music"));
        assert!(cards[0].image.is_none());
    }

    #[test]
    fn enrollment_picks_the_route() {
        let id = CourseId::new("guitar").unwrap();
        assert_eq!(
            course_route(id.clone(), true),
            Route::CourseDetails {
                course_id: id.clone()
            }
        );
        assert_eq!(course_route(id.clone(), false), Route::CourseJoin { course_id: id });
    }

    #[test]
    fn module_rows_label_completion() {
        let course = course("guitar", None);
        let module = |id: &str| {
            Module::new(
                ModuleId::new(id).unwrap(),
                course.id().clone(),
                id,
                None,
                Vec::new(),
            )
            .unwrap()
        };
        let details = CourseDetails {
            course: course.clone(),
            modules: vec![
                ModuleStatus {
                    module: module("a"),
                    completed: true,
                },
                ModuleStatus {
                    module: module("b"),
                    completed: false,
                },
            ],
            exam_completed: false,
        };
        let rows = map_module_rows(&details);
        assert_eq!(rows[0].status_label, "Completed");
        assert_eq!(rows[1].status_label, "Not completed");
    }
}
