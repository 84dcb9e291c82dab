//! Course catalog for the LearnHub dashboard.
//!
//! Serves the built-in mock catalog, per-user learning preferences,
//! recommendations, daily topics and progress updates.

pub mod catalog;
pub mod error;
pub mod service;
pub mod types;

pub use error::CourseError;
pub use service::CourseService;
pub use types::{
    Course, CourseFilter, CourseLevel, DailyTopic, PreferencesPatch, PreferredLevel, SortOrder,
    StatusTab, UserPreferences,
};
