use skill_core::model::{CourseId, CourseProgress, ProgressFraction, UserProfile};

/// Width assumed until the first resize event arrives.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1024.0;

/// Rows of ongoing courses shown before "Show More".
const COLLAPSED_ROWS: usize = 2;

/// Card for one ongoing or completed course on the home screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressCardVm {
    pub id: CourseId,
    pub name: String,
    pub image: Option<String>,
    pub modules_label: String,
    pub percent_label: String,
    pub bar_value: f64,
    pub final_exam_left: bool,
}

impl ProgressCardVm {
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(query)
    }
}

/// Number of course columns for a viewport width in pixels.
#[must_use]
pub fn columns_for_width(width: f64) -> usize {
    match width {
        w if w >= 1200.0 => 6,
        w if w >= 992.0 => 5,
        w if w >= 768.0 => 4,
        w if w >= 576.0 => 3,
        _ => 2,
    }
}

/// How many of `total` cards to render.
#[must_use]
pub fn visible_count(columns: usize, expanded: bool, total: usize) -> usize {
    if expanded {
        total
    } else {
        total.min(columns * COLLAPSED_ROWS)
    }
}

/// Greeting line; falls back to the account email until the profile loads.
#[must_use]
pub fn greeting(profile: Option<&UserProfile>, email: &str) -> String {
    let name = profile.map_or(email, UserProfile::name);
    format!("Hello, {name}")
}

#[must_use]
pub fn map_progress_cards(progress: &[CourseProgress]) -> Vec<ProgressCardVm> {
    progress.iter().map(map_progress_card).collect()
}

fn map_progress_card(progress: &CourseProgress) -> ProgressCardVm {
    let fraction = progress.fraction();
    let percent_label = match fraction {
        ProgressFraction::Ratio(_) => format!("{}%", fraction.percent().unwrap_or_default()),
        ProgressFraction::NotApplicable => "N/A".to_string(),
    };
    ProgressCardVm {
        id: progress.course.id().clone(),
        name: progress.course.name().to_string(),
        image: progress.course.image_data_uri(),
        modules_label: format!(
            "{} / {} modules",
            progress.completed_modules, progress.total_modules
        ),
        percent_label,
        bar_value: fraction.bar_value(),
        final_exam_left: progress.final_exam_left(),
    }
}

/// Cards whose name contains the trimmed, lower-cased query.
#[must_use]
pub fn filter_progress_cards(cards: &[ProgressCardVm], query: &str) -> Vec<ProgressCardVm> {
    let query = query.trim().to_lowercase();
    cards
        .iter()
        .filter(|card| card.matches_query(&query))
        .cloned()
        .collect()
}
