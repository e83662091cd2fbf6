//! Where the store keeps its files: the default data directory and the
//! fixed file names beneath it.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".grade-tracker";

/// Full snapshot of the student registry, ledgers included.
pub(crate) const STUDENTS_SNAPSHOT: &str = "students.json";
/// Full snapshot of the course catalog.
pub(crate) const COURSES_SNAPSHOT: &str = "courses.json";
/// Authoritative enrollment relation, one row per pair.
pub(crate) const ENROLLMENTS_CSV: &str = "enrollments.csv";
/// Write-only export, one row per recorded grade.
pub(crate) const GRADES_CSV: &str = "grades.csv";
/// Write-only export, one row per course.
pub(crate) const COURSES_CSV: &str = "courses.csv";

/// Resolve the default data directory inside the user's home.
pub fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Every file the store reads or writes under one base directory.
#[derive(Debug, Clone)]
pub(crate) struct DataFiles {
    /// `students.json`
    pub students: PathBuf,
    /// `courses.json`
    pub courses: PathBuf,
    /// `enrollments.csv`
    pub enrollments: PathBuf,
    /// `grades.csv`
    pub grades: PathBuf,
    /// `courses.csv`, not to be confused with the course snapshot.
    pub course_export: PathBuf,
}

impl DataFiles {
    /// Paths of every data file inside `base`. Nothing is created here.
    pub fn under(base: &Path) -> Self {
        Self {
            students: base.join(STUDENTS_SNAPSHOT),
            courses: base.join(COURSES_SNAPSHOT),
            enrollments: base.join(ENROLLMENTS_CSV),
            grades: base.join(GRADES_CSV),
            course_export: base.join(COURSES_CSV),
        }
    }
}
