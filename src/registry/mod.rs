//! In-memory registry of courses, students and enrollments, split across
//! submodules by concern. A [`Registry`] is an ordinary value: build one at
//! startup (empty or via [`crate::store::load`]), mutate it through its
//! methods, persist it with [`crate::store::save`] and drop it.

mod courses;
mod enrollment;
mod reports;
mod students;

use std::collections::BTreeMap;

use crate::models::{Course, Student};

pub(crate) use enrollment::Enrollments;
pub use reports::{
    CategorySummary, CourseEnrollment, CourseReport, CourseStanding, CourseStatistics, Overview,
    RosterEntry, StudentEnrollment, StudentReport, POPULAR_COURSE_LIMIT,
};

/// Owns every course, student and enrollment of one session. All mutation
/// goes through its methods so the enrollment views and the student ledgers
/// never drift apart.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    /// Course catalog keyed by course code.
    courses: BTreeMap<String, Course>,
    /// Students keyed by SR-Code, each carrying its grade ledger.
    students: BTreeMap<String, Student>,
    /// The student/course relation with its two lookup views.
    enrollments: Enrollments,
}

impl Registry {
    /// An empty registry with no courses, students or enrollments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a course by its exact code.
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// Courses ordered by code.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Look up a student by exact SR-Code; there is no partial matching.
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    /// Students ordered by id.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// Every (student id, course code) pair in enrollment order.
    pub fn enrollment_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.enrollments.pairs()
    }

    /// Put a course back as-is, used when restoring a snapshot.
    pub(crate) fn insert_course(&mut self, course: Course) {
        self.courses.insert(course.code.clone(), course);
    }

    /// Put a student back with its ledger, used when restoring a snapshot.
    pub(crate) fn insert_student(&mut self, student: Student) {
        self.students.insert(student.id.clone(), student);
    }
}
