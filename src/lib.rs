//! Core library for the grade tracker: the course/student registry, the
//! weighted-grade engine and the on-disk store.
//!
//! The binary only wires configuration and logging around these pieces; any
//! other front end (menu, test harness, RPC handler) builds its own
//! [`Registry`] and drives it the same way.
pub mod config;
pub mod errors;
pub mod grading;
pub mod models;
pub mod registry;
pub mod store;

pub use config::Config;
pub use errors::{RegistryError, StoreError};

/// Grade computation entry points.
pub use grading::{
    course_grade, letter_grade, predict_required_final_score, Letter, Outcome, Prediction,
};

/// The domain types the registry hands out.
pub use models::{CategoryWeight, Course, GradeEntry, Student, WeightScheme};

/// The registry and the report data it assembles.
pub use registry::{
    CategorySummary, CourseEnrollment, CourseReport, CourseStanding, CourseStatistics, Overview,
    Registry, RosterEntry, StudentEnrollment, StudentReport,
};
pub use store::{load, save};
