//! Catalog types: courses, learner preferences, daily topics and grid filters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CourseError;

// =============================================================================
// Courses
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseLevel {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            other => Err(CourseError::InvalidFilter(format!("unknown level '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    /// Percent complete, always within 0..=100.
    pub progress: u8,
    pub category: String,
    pub duration: String,
    pub level: CourseLevel,
    pub tags: Vec<String>,
    pub rating: f64,
    pub enrolled_count: u32,
    #[serde(default)]
    pub is_recommended: bool,
}

impl Course {
    pub fn is_in_progress(&self) -> bool {
        self.progress > 0 && self.progress < 100
    }

    pub fn is_completed(&self) -> bool {
        self.progress == 100
    }

    pub fn is_not_started(&self) -> bool {
        self.progress == 0
    }

    /// Popularity score used to order recommendations.
    pub fn recommendation_score(&self) -> f64 {
        self.rating * 0.7 + (f64::from(self.enrolled_count) / 2000.0) * 0.3
    }
}

// =============================================================================
// Preferences
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredLevel {
    Beginner,
    Intermediate,
    Advanced,
    #[default]
    All,
}

impl PreferredLevel {
    pub fn accepts(&self, level: CourseLevel) -> bool {
        match self {
            PreferredLevel::All => true,
            PreferredLevel::Beginner => level == CourseLevel::Beginner,
            PreferredLevel::Intermediate => level == CourseLevel::Intermediate,
            PreferredLevel::Advanced => level == CourseLevel::Advanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub interests: Vec<String>,
    pub preferred_categories: Vec<String>,
    pub preferred_level: PreferredLevel,
    pub learning_goals: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            interests: vec![
                "AI".to_string(),
                "Machine Learning".to_string(),
                "Web Development".to_string(),
            ],
            preferred_categories: vec!["AI".to_string(), "Data Science".to_string()],
            preferred_level: PreferredLevel::All,
            learning_goals: vec![
                "Career advancement".to_string(),
                "Skill development".to_string(),
            ],
        }
    }
}

impl UserPreferences {
    pub fn is_interested_in(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.interests.contains(tag))
    }

    /// Overwrite every field the patch sets.
    pub fn merge(&mut self, patch: PreferencesPatch) {
        if let Some(interests) = patch.interests {
            self.interests = interests;
        }
        if let Some(categories) = patch.preferred_categories {
            self.preferred_categories = categories;
        }
        if let Some(level) = patch.preferred_level {
            self.preferred_level = level;
        }
        if let Some(goals) = patch.learning_goals {
            self.learning_goals = goals;
        }
    }
}

/// Partial preference update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_level: Option<PreferredLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_goals: Option<Vec<String>>,
}

// =============================================================================
// Daily topics
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTopic {
    pub title: String,
    pub description: String,
    /// Icon name understood by the dashboard.
    pub icon: String,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub tags: Vec<String>,
}

// =============================================================================
// Catalog grid filters
// =============================================================================

/// Progress tab on the catalog grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusTab {
    #[default]
    All,
    InProgress,
    Completed,
    NotStarted,
}

impl StatusTab {
    pub fn includes(&self, course: &Course) -> bool {
        match self {
            StatusTab::All => true,
            StatusTab::InProgress => course.is_in_progress(),
            StatusTab::Completed => course.is_completed(),
            StatusTab::NotStarted => course.is_not_started(),
        }
    }
}

impl FromStr for StatusTab {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusTab::All),
            "in-progress" => Ok(StatusTab::InProgress),
            "completed" => Ok(StatusTab::Completed),
            "not-started" => Ok(StatusTab::NotStarted),
            other => Err(CourseError::InvalidFilter(format!("unknown status '{}'", other))),
        }
    }
}

/// Title ordering on the catalog grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CourseError::InvalidFilter(format!("unknown sort '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Case-insensitive substring of title or description.
    pub query: Option<String>,
    /// Exact category; `None` or `"all"` matches any.
    pub category: Option<String>,
    pub status: StatusTab,
    pub sort: SortOrder,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        let query_ok = match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                course.title.to_lowercase().contains(&q)
                    || course.description.to_lowercase().contains(&q)
            }
        };
        let category_ok = match self.category.as_deref() {
            None | Some("all") => true,
            Some(category) => course.category == category,
        };
        query_ok && category_ok && self.status.includes(course)
    }
}
