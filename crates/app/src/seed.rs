use skill_core::error::Error as DomainError;
use skill_core::model::{
    Course, CourseError, CourseId, ExamEntry, ExamEntryId, IdError, Module, ModuleError,
    ModuleId, QuizError, QuizQuestion,
};
use storage::repository::{CatalogRepository, StorageError};
use tracing::info;

#[derive(Debug)]
pub enum SeedError {
    Domain(DomainError),
    Storage(StorageError),
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedError::Domain(err) => write!(f, "invalid demo data: {err}"),
            SeedError::Storage(err) => write!(f, "failed to write demo data: {err}"),
        }
    }
}

impl std::error::Error for SeedError {}

macro_rules! domain_error {
    ($($source:ty),*) => {
        $(impl From<$source> for SeedError {
            fn from(err: $source) -> Self {
                SeedError::Domain(DomainError::from(err))
            }
        })*
    };
}

domain_error!(IdError, CourseError, ModuleError, QuizError);

struct DemoModule {
    id: &'static str,
    name: &'static str,
    link: Option<&'static str>,
    quiz: &'static [(&'static str, &'static [&'static str], usize)],
}

struct DemoCourse {
    id: &'static str,
    name: &'static str,
    genre: &'static str,
    description: &'static str,
    modules: &'static [DemoModule],
    exam: &'static [(&'static str, &'static [&'static str], usize)],
}

const DEMO_CATALOG: &[DemoCourse] = &[
    DemoCourse {
        id: "acoustic-guitar",
        name: "Acoustic Guitar",
        genre: "Music",
        description: "Tune up, learn your first chords and keep a steady strum.",
        modules: &[
            DemoModule {
                id: "01-tuning",
                name: "Tuning the Guitar",
                link: Some("https://en.wikipedia.org/wiki/Guitar_tunings"),
                quiz: &[
                    ("Which string is the thickest?", &["High E", "Low E", "G"], 1),
                    ("Standard tuning starts from which note?", &["E", "A", "D"], 0),
                ],
            },
            DemoModule {
                id: "02-chords",
                name: "Open Chords",
                link: Some("https://en.wikipedia.org/wiki/Open_chord"),
                quiz: &[("How many notes form a major triad?", &["Two", "Three", "Four"], 1)],
            },
            DemoModule {
                id: "03-strumming",
                name: "Strumming Patterns",
                link: None,
                quiz: &[],
            },
        ],
        exam: &[
            ("Which chord uses all six open strings in E?", &["E major", "C major", "F major"], 0),
            ("A capo is used to...", &["Mute strings", "Raise the pitch", "Tune the guitar"], 1),
        ],
    },
    DemoCourse {
        id: "watercolor",
        name: "Watercolor Basics",
        genre: "Art",
        description: "Washes, layering and color mixing with a small palette.",
        modules: &[
            DemoModule {
                id: "01-materials",
                name: "Paper and Brushes",
                link: Some("https://en.wikipedia.org/wiki/Watercolor_painting"),
                quiz: &[("Which paper weight resists buckling?", &["90 gsm", "300 gsm", "45 gsm"], 1)],
            },
            DemoModule {
                id: "02-washes",
                name: "Flat and Graded Washes",
                link: None,
                quiz: &[
                    ("A graded wash goes from...", &["Dark to light", "Wet to dry", "Warm to cold"], 0),
                ],
            },
        ],
        exam: &[("Wet-on-wet means painting onto...", &["Dry paper", "Damp paper", "Canvas"], 1)],
    },
    DemoCourse {
        id: "sourdough",
        name: "Sourdough Baking",
        genre: "Cooking",
        description: "Keep a starter alive and bake a crusty loaf.",
        modules: &[DemoModule {
            id: "01-starter",
            name: "Feeding a Starter",
            link: Some("https://en.wikipedia.org/wiki/Sourdough"),
            quiz: &[("A starter is fed with...", &["Sugar", "Flour and water", "Yeast"], 1)],
        }],
        exam: &[],
    },
];

fn question(
    (text, answers, correct): &(&'static str, &'static [&'static str], usize),
) -> Result<QuizQuestion, SeedError> {
    let answers = answers.iter().map(|a| (*a).to_string()).collect();
    Ok(QuizQuestion::new(*text, answers, *correct)?)
}

/// Write the demo courses, modules and exams. Existing rows are overwritten.
///
/// # Errors
///
/// Returns `SeedError` if a demo document is invalid or a write fails.
pub async fn seed_demo_catalog(catalog: &dyn CatalogRepository) -> Result<usize, SeedError> {
    for demo in DEMO_CATALOG {
        let course_id = CourseId::new(demo.id)?;
        let course = Course::new(
            course_id.clone(),
            demo.name,
            "",
            Some(demo.genre.to_string()),
            demo.description,
        )?;
        catalog
            .upsert_course(&course)
            .await
            .map_err(SeedError::Storage)?;

        for module in demo.modules {
            let quiz = module
                .quiz
                .iter()
                .map(question)
                .collect::<Result<Vec<_>, _>>()?;
            let module = Module::new(
                ModuleId::new(module.id)?,
                course_id.clone(),
                module.name,
                Module::parse_content_link(module.link)?,
                quiz,
            )?;
            catalog
                .upsert_module(&module)
                .await
                .map_err(SeedError::Storage)?;
        }

        for (index, raw) in demo.exam.iter().enumerate() {
            let entry = ExamEntry::new(ExamEntryId::new(format!("q{}", index + 1))?, question(raw)?);
            catalog
                .upsert_exam_entry(&course_id, &entry)
                .await
                .map_err(SeedError::Storage)?;
        }
        info!(course = %course_id, modules = demo.modules.len(), "seeded course");
    }
    Ok(DEMO_CATALOG.len())
}
