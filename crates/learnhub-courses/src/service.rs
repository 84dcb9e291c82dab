//! In-memory course service.
//!
//! Holds the mutable catalog (progress changes) and per-user preferences.
//! Users without stored preferences get [`UserPreferences::default`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog;
use crate::types::{
    Course, CourseFilter, CourseLevel, DailyTopic, PreferencesPatch, SortOrder, UserPreferences,
};

pub struct CourseService {
    courses: Mutex<Vec<Course>>,
    preferences: Mutex<HashMap<String, UserPreferences>>,
    topics: Vec<DailyTopic>,
}

impl Default for CourseService {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseService {
    /// Service seeded with the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(catalog::mock_courses(), catalog::daily_topic_pool())
    }

    pub fn with_catalog(courses: Vec<Course>, topics: Vec<DailyTopic>) -> Self {
        tracing::debug!(courses = courses.len(), topics = topics.len(), "Course catalog loaded");
        Self {
            courses: Mutex::new(courses),
            preferences: Mutex::new(HashMap::new()),
            topics,
        }
    }

    // =========================================================================
    // Catalog queries
    // =========================================================================

    pub fn all_courses(&self) -> Vec<Course> {
        self.courses().clone()
    }

    pub fn course_by_id(&self, id: &str) -> Option<Course> {
        self.courses().iter().find(|c| c.id == id).cloned()
    }

    pub fn courses_by_category(&self, category: &str) -> Vec<Course> {
        self.select(|c| c.category == category)
    }

    pub fn courses_by_level(&self, level: CourseLevel) -> Vec<Course> {
        self.select(|c| c.level == level)
    }

    pub fn courses_in_progress(&self) -> Vec<Course> {
        self.select(Course::is_in_progress)
    }

    pub fn completed_courses(&self) -> Vec<Course> {
        self.select(Course::is_completed)
    }

    pub fn not_started_courses(&self) -> Vec<Course> {
        self.select(Course::is_not_started)
    }

    /// Catalog grid query: search, category, status tab, then title sort.
    pub fn browse(&self, filter: &CourseFilter) -> Vec<Course> {
        let mut courses = self.select(|c| filter.matches(c));
        courses.sort_by(|a, b| {
            let ord = a.title.to_lowercase().cmp(&b.title.to_lowercase());
            match filter.sort {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        courses
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    pub fn user_preferences(&self, user_id: &str) -> UserPreferences {
        self.preferences()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Merge `patch` into the user's current preferences and store the result.
    pub fn update_user_preferences(&self, user_id: &str, patch: PreferencesPatch) -> UserPreferences {
        let mut prefs = self.preferences();
        let entry = prefs.entry(user_id.to_string()).or_default();
        entry.merge(patch);
        tracing::info!(user_id, level = ?entry.preferred_level, "Preferences updated");
        entry.clone()
    }

    // =========================================================================
    // Recommendations
    // =========================================================================

    /// Courses matching the user's interests or preferred categories at an
    /// acceptable level, most popular first, at most `limit` of them.
    pub fn recommended_courses(&self, user_id: &str, limit: usize) -> Vec<Course> {
        let prefs = self.user_preferences(user_id);
        let mut matches = self.select(|c| {
            let relevant = prefs.is_interested_in(&c.tags)
                || prefs.preferred_categories.contains(&c.category);
            relevant && prefs.preferred_level.accepts(c.level)
        });
        matches.sort_by(|a, b| {
            b.recommendation_score()
                .partial_cmp(&a.recommendation_score())
                .unwrap_or(Ordering::Equal)
        });
        matches.truncate(limit);
        matches
    }

    /// Topics tagged with one of the user's interests, in random order. Falls
    /// back to the head of the pool when nothing matches.
    pub fn daily_topics(&self, user_id: &str, limit: usize) -> Vec<DailyTopic> {
        self.daily_topics_with_rng(user_id, limit, &mut rand::rng())
    }

    pub fn daily_topics_with_rng<R: Rng + ?Sized>(
        &self,
        user_id: &str,
        limit: usize,
        rng: &mut R,
    ) -> Vec<DailyTopic> {
        let prefs = self.user_preferences(user_id);
        let mut matching: Vec<DailyTopic> = self
            .topics
            .iter()
            .filter(|t| prefs.is_interested_in(&t.tags))
            .cloned()
            .collect();

        if matching.is_empty() {
            return self.topics.iter().take(limit).cloned().collect();
        }

        matching.shuffle(rng);
        matching.truncate(limit);
        matching
    }

    // =========================================================================
    // Progress
    // =========================================================================

    /// Set a course's progress, clamped to 0..=100 and rounded to the nearest
    /// whole percent (NaN counts as 0). Returns the updated course, or `None`
    /// if the id is unknown.
    pub fn update_course_progress(&self, course_id: &str, progress: f64) -> Option<Course> {
        let mut courses = self.courses();
        let course = courses.iter_mut().find(|c| c.id == course_id)?;
        course.progress = if progress.is_nan() {
            0
        } else {
            progress.clamp(0.0, 100.0).round() as u8
        };
        tracing::debug!(course_id, progress = course.progress, "Course progress updated");
        Some(course.clone())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn select(&self, pred: impl Fn(&Course) -> bool) -> Vec<Course> {
        self.courses().iter().filter(|c| pred(c)).cloned().collect()
    }

    fn courses(&self) -> MutexGuard<'_, Vec<Course>> {
        self.courses.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Course catalog lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    fn preferences(&self) -> MutexGuard<'_, HashMap<String, UserPreferences>> {
        self.preferences.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Preferences lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PreferredLevel, StatusTab};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ids(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_catalog_queries() {
        let svc = CourseService::new();
        assert_eq!(svc.all_courses().len(), 10);
        assert_eq!(svc.course_by_id("4").unwrap().title, "Machine Learning Applications");
        assert!(svc.course_by_id("99").is_none());
        assert_eq!(ids(&svc.courses_by_category("AI")), vec!["1", "4", "7"]);
        assert_eq!(ids(&svc.courses_by_level(CourseLevel::Advanced)), vec!["7"]);
        assert_eq!(svc.courses_in_progress().len(), 6);
        assert!(svc.completed_courses().is_empty());
        assert_eq!(ids(&svc.not_started_courses()), vec!["7", "8", "9", "10"]);
    }

    #[test]
    fn test_progress_is_clamped() {
        let svc = CourseService::new();
        assert_eq!(svc.update_course_progress("2", 150.0).unwrap().progress, 100);
        assert_eq!(svc.course_by_id("2").unwrap().progress, 100);
        assert_eq!(svc.update_course_progress("2", -20.0).unwrap().progress, 0);
        assert_eq!(svc.update_course_progress("2", 55.0).unwrap().progress, 55);
        assert_eq!(svc.update_course_progress("2", 42.6).unwrap().progress, 43);
        assert_eq!(svc.update_course_progress("2", 0.4).unwrap().progress, 0);
        assert_eq!(svc.update_course_progress("2", f64::NAN).unwrap().progress, 0);
    }

    #[test]
    fn test_progress_unknown_course() {
        let svc = CourseService::new();
        assert!(svc.update_course_progress("nope", 50.0).is_none());
    }

    #[test]
    fn test_completing_moves_course_between_buckets() {
        let svc = CourseService::new();
        svc.update_course_progress("1", 100.0);
        assert_eq!(ids(&svc.completed_courses()), vec!["1"]);
        assert_eq!(svc.courses_in_progress().len(), 5);
    }

    #[test]
    fn test_default_preferences_for_unknown_user() {
        let svc = CourseService::new();
        assert_eq!(svc.user_preferences("someone"), UserPreferences::default());
    }

    #[test]
    fn test_update_preferences_is_stored_per_user() {
        let svc = CourseService::new();
        let updated = svc.update_user_preferences(
            "alice",
            PreferencesPatch {
                interests: Some(vec!["Blockchain".to_string()]),
                ..PreferencesPatch::default()
            },
        );
        assert_eq!(updated.interests, vec!["Blockchain".to_string()]);
        assert_eq!(updated.preferred_categories, UserPreferences::default().preferred_categories);
        assert_eq!(svc.user_preferences("alice"), updated);
        assert_eq!(svc.user_preferences("bob"), UserPreferences::default());
    }

    #[test]
    fn test_recommendations_for_default_preferences() {
        let svc = CourseService::new();
        let recs = svc.recommended_courses("alice", 3);
        assert_eq!(ids(&recs), vec!["4", "7", "1"]);
        assert_eq!(ids(&svc.recommended_courses("alice", 10)), vec!["4", "7", "1", "3"]);
        assert!(svc.recommended_courses("alice", 0).is_empty());
    }

    #[test]
    fn test_recommendations_respect_level() {
        let svc = CourseService::new();
        svc.update_user_preferences(
            "alice",
            PreferencesPatch {
                preferred_level: Some(PreferredLevel::Beginner),
                ..PreferencesPatch::default()
            },
        );
        let recs = svc.recommended_courses("alice", 3);
        assert!(recs.len() <= 3);
        assert!(recs.iter().all(|c| c.level == CourseLevel::Beginner));
        assert_eq!(ids(&recs), vec!["1", "3"]);
    }

    #[test]
    fn test_recommendations_none_match() {
        let svc = CourseService::new();
        svc.update_user_preferences(
            "alice",
            PreferencesPatch {
                interests: Some(vec![]),
                preferred_categories: Some(vec!["Cooking".to_string()]),
                ..PreferencesPatch::default()
            },
        );
        assert!(svc.recommended_courses("alice", 3).is_empty());
    }

    #[test]
    fn test_daily_topics_match_interests() {
        let svc = CourseService::new();
        let mut rng = StdRng::seed_from_u64(3);
        let prefs = UserPreferences::default();
        let topics = svc.daily_topics_with_rng("alice", 3, &mut rng);
        assert_eq!(topics.len(), 3);
        assert!(topics.iter().all(|t| prefs.is_interested_in(&t.tags)));

        let all = svc.daily_topics_with_rng("alice", 10, &mut rng);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_daily_topics_fallback_in_pool_order() {
        let svc = CourseService::new();
        svc.update_user_preferences(
            "alice",
            PreferencesPatch {
                interests: Some(vec!["Gardening".to_string()]),
                ..PreferencesPatch::default()
            },
        );
        let topics = svc.daily_topics("alice", 2);
        let titles: Vec<_> = topics.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Machine Learning Fundamentals", "Advanced React Patterns"]);
    }

    #[test]
    fn test_browse_search_and_sort() {
        let svc = CourseService::new();
        let filter = CourseFilter {
            query: Some("learning".to_string()),
            ..CourseFilter::default()
        };
        let titles: Vec<_> = svc.browse(&filter).into_iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            vec![
                "Deep Learning Specialization",
                "Introduction to Artificial Intelligence",
                "Machine Learning Applications",
            ]
        );

        let desc = CourseFilter {
            sort: SortOrder::Desc,
            ..filter
        };
        assert_eq!(svc.browse(&desc)[0].title, "Machine Learning Applications");
    }

    #[test]
    fn test_browse_category_and_status() {
        let svc = CourseService::new();
        let filter = CourseFilter {
            category: Some("AI".to_string()),
            status: StatusTab::NotStarted,
            ..CourseFilter::default()
        };
        assert_eq!(ids(&svc.browse(&filter)), vec!["7"]);

        let everything = CourseFilter {
            category: Some("all".to_string()),
            ..CourseFilter::default()
        };
        assert_eq!(svc.browse(&everything).len(), 10);
    }
}
