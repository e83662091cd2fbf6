//! Full-fidelity snapshots of the student registry and the course catalog.
//!
//! Each file is a versioned JSON document holding a flat list of records.
//! The record types below are the on-disk contract; the models convert to and
//! from them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::models::{CategoryWeight, Course, GradeEntry, Student, WeightScheme};
use crate::registry::Registry;

/// Format version written into every snapshot. Loading any other version
/// fails; there is no migration path.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct Header {
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct StudentsSnapshot {
    version: u32,
    students: Vec<StudentRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StudentRecord {
    id: String,
    name: String,
    major: String,
    ledger: Vec<LedgerRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LedgerRecord {
    course: String,
    grades: Vec<GradeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GradeRecord {
    category: String,
    label: String,
    value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct CoursesSnapshot {
    version: u32,
    courses: Vec<CourseRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CourseRecord {
    code: String,
    name: String,
    credits: u32,
    weights: Vec<WeightRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WeightRecord {
    category: String,
    weight: f64,
}

impl From<&Student> for StudentRecord {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.clone(),
            name: student.name.clone(),
            major: student.major.clone(),
            ledger: student
                .ledger()
                .map(|(course, grades)| LedgerRecord {
                    course: course.to_string(),
                    grades: grades
                        .iter()
                        .map(|entry| GradeRecord {
                            category: entry.category.clone(),
                            label: entry.label.clone(),
                            value: entry.value,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<StudentRecord> for Student {
    fn from(record: StudentRecord) -> Self {
        let mut student = Student::new(&record.id, &record.name, &record.major);
        for ledger in record.ledger {
            student.ledger.insert(
                ledger.course,
                ledger
                    .grades
                    .into_iter()
                    .map(|grade| GradeEntry {
                        category: grade.category,
                        label: grade.label,
                        value: grade.value,
                    })
                    .collect(),
            );
        }
        student
    }
}

impl From<&Course> for CourseRecord {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            credits: course.credits,
            weights: course
                .weights
                .iter()
                .map(|entry| WeightRecord {
                    category: entry.category.clone(),
                    weight: entry.weight,
                })
                .collect(),
        }
    }
}

impl From<CourseRecord> for Course {
    fn from(record: CourseRecord) -> Self {
        Self {
            code: record.code,
            name: record.name,
            credits: record.credits,
            weights: WeightScheme::from_entries(
                record
                    .weights
                    .into_iter()
                    .map(|weight| CategoryWeight {
                        category: weight.category,
                        weight: weight.weight,
                    })
                    .collect(),
            ),
        }
    }
}

pub(crate) fn write_students(path: &Path, registry: &Registry) -> Result<(), StoreError> {
    let snapshot = StudentsSnapshot {
        version: SNAPSHOT_VERSION,
        students: registry.students().map(StudentRecord::from).collect(),
    };
    write_json(path, &snapshot)
}

pub(crate) fn read_students(path: &Path) -> Result<Vec<Student>, StoreError> {
    let snapshot: StudentsSnapshot = read_json(path)?;
    Ok(snapshot.students.into_iter().map(Student::from).collect())
}

pub(crate) fn write_courses(path: &Path, registry: &Registry) -> Result<(), StoreError> {
    let snapshot = CoursesSnapshot {
        version: SNAPSHOT_VERSION,
        courses: registry.courses().map(CourseRecord::from).collect(),
    };
    write_json(path, &snapshot)
}

pub(crate) fn read_courses(path: &Path) -> Result<Vec<Course>, StoreError> {
    let snapshot: CoursesSnapshot = read_json(path)?;
    Ok(snapshot.courses.into_iter().map(Course::from).collect())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| StoreError::json(path, e))?;
    writer.flush().map_err(|e| StoreError::io(path, e))
}

/// Read a snapshot, checking the version before decoding the body so an old
/// or future file reports its version instead of a shape mismatch.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;

    let header: Header = serde_json::from_str(&content).map_err(|e| StoreError::json(path, e))?;
    if header.version != SNAPSHOT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            path: path.to_string_lossy().to_string(),
            found: header.version,
        });
    }

    serde_json::from_str(&content).map_err(|e| StoreError::json(path, e))
}
