//! Flat CSV files written next to the snapshots. `enrollments.csv` is also
//! read back on load; the grade and course exports are write-only.

use std::path::Path;

use log::warn;

use crate::errors::StoreError;
use crate::registry::Registry;

const ENROLLMENT_HEADER: [&str; 2] = ["StudentID", "CourseCode"];
const GRADE_HEADER: [&str; 5] = [
    "StudentID",
    "CourseCode",
    "AssignmentType",
    "AssignmentName",
    "Grade",
];
const COURSE_HEADER: [&str; 4] = ["CourseCode", "CourseName", "Credits", "Weights"];

pub(crate) fn write_enrollments(path: &Path, registry: &Registry) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    writer
        .write_record(ENROLLMENT_HEADER)
        .map_err(|e| StoreError::csv(path, e))?;
    for (student_id, course_code) in registry.enrollment_pairs() {
        writer
            .write_record([student_id, course_code])
            .map_err(|e| StoreError::csv(path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))
}

/// Read enrollment pairs, skipping rows that do not have exactly two fields
/// or cannot be parsed at all. Fields are taken verbatim, whitespace included.
///
/// Returns `None` when the file does not exist, which is not the same as a
/// file holding only the header.
pub(crate) fn read_enrollments(
    path: &Path,
) -> Result<Option<Vec<(String, String)>>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| StoreError::csv(path, e))?;

    let mut pairs = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let line = index + 2;
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(StoreError::csv(path, err)),
            Err(err) => {
                warn!("skipping unreadable enrollment row {line}: {err}");
                continue;
            }
        };
        if record.len() != 2 {
            warn!("skipping enrollment row {line} with {} fields", record.len());
            continue;
        }
        pairs.push((record[0].to_string(), record[1].to_string()));
    }
    Ok(Some(pairs))
}

pub(crate) fn write_grades(path: &Path, registry: &Registry) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    writer
        .write_record(GRADE_HEADER)
        .map_err(|e| StoreError::csv(path, e))?;
    for student in registry.students() {
        for (course_code, grades) in student.ledger() {
            for entry in grades {
                writer
                    .write_record([
                        student.id(),
                        course_code,
                        entry.category.as_str(),
                        entry.label.as_str(),
                        format!("{:.2}", entry.value).as_str(),
                    ])
                    .map_err(|e| StoreError::csv(path, e))?;
            }
        }
    }
    writer.flush().map_err(|e| StoreError::io(path, e))
}

pub(crate) fn write_courses(path: &Path, registry: &Registry) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| StoreError::csv(path, e))?;
    writer
        .write_record(COURSE_HEADER)
        .map_err(|e| StoreError::csv(path, e))?;
    for course in registry.courses() {
        writer
            .write_record([
                course.code(),
                course.name(),
                course.credits().to_string().as_str(),
                course.weights().to_string().as_str(),
            ])
            .map_err(|e| StoreError::csv(path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))
}
