//! Persistence of a [`Registry`] under a base directory. The store is split
//! into two file families: full JSON snapshots and flat CSV exports.
//!
//! Saving is not transactional. Files are written one after another and the
//! first failure stops the sequence, leaving earlier files in place. Loading
//! always builds a fresh registry, so a failed load never disturbs the one the
//! caller already holds.

mod exports;
mod paths;
mod snapshot;

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::errors::StoreError;
use crate::registry::Registry;

pub use paths::default_data_dir;
pub use snapshot::SNAPSHOT_VERSION;

use paths::DataFiles;

/// Write both snapshots and the three CSV exports under `base`, creating the
/// directory if needed.
pub fn save(registry: &Registry, base: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(base).map_err(|e| StoreError::io(base, e))?;
    let files = DataFiles::under(base);

    snapshot::write_students(&files.students, registry)?;
    snapshot::write_courses(&files.courses, registry)?;
    exports::write_enrollments(&files.enrollments, registry)?;
    exports::write_grades(&files.grades, registry)?;
    exports::write_courses(&files.course_export, registry)?;

    info!(
        "saved {} students and {} courses to {}",
        registry.students().count(),
        registry.courses().count(),
        base.display()
    );
    Ok(())
}

/// Rebuild a registry from `base`.
///
/// A missing student snapshot means there is nothing saved yet and yields an
/// empty registry. Once it exists, the course snapshot must be readable too.
/// When `enrollments.csv` exists it is the enrollment relation: rows naming an
/// unknown student or course are skipped, and ledger entries left without a
/// matching row are dropped. When it is missing, the relation is rebuilt from
/// the ledgers in the student snapshot and nothing is dropped.
pub fn load(base: &Path) -> Result<Registry, StoreError> {
    let files = DataFiles::under(base);
    let mut registry = Registry::new();

    if !files.students.exists() {
        info!("no saved data in {}", base.display());
        return Ok(registry);
    }

    for student in snapshot::read_students(&files.students)? {
        registry.insert_student(student);
    }
    for course in snapshot::read_courses(&files.courses)? {
        registry.insert_course(course);
    }

    match exports::read_enrollments(&files.enrollments)? {
        Some(pairs) => {
            for (student_id, course_code) in pairs {
                if let Err(err) = registry.enroll(&student_id, &course_code) {
                    warn!("skipping enrollment {student_id},{course_code}: {err}");
                }
            }
            let dropped = registry.prune_unenrolled_ledgers();
            if dropped > 0 {
                warn!("dropped {dropped} ledger entries with no enrollment record");
            }
        }
        None => {
            warn!(
                "{} is missing, rebuilding enrollments from student ledgers",
                files.enrollments.display()
            );
            registry.enroll_from_ledgers();
        }
    }

    info!(
        "loaded {} students, {} courses and {} enrollments from {}",
        registry.students().count(),
        registry.courses().count(),
        registry.enrollment_pairs().count(),
        base.display()
    );
    Ok(registry)
}
