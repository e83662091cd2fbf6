use log::debug;

use crate::errors::RegistryError;
use crate::models::{GradeEntry, Student};

use super::Registry;

/// Inclusive range accepted by [`Registry::record_grade`].
const GRADE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

impl Registry {
    /// Register a new student. Fails without touching the registry when the
    /// id is taken.
    pub fn create_student(
        &mut self,
        id: &str,
        name: &str,
        major: &str,
    ) -> Result<(), RegistryError> {
        if self.students.contains_key(id) {
            return Err(RegistryError::AlreadyExists { id: id.to_string() });
        }
        if id.trim().is_empty() {
            return Err(RegistryError::Validation(
                "student id must not be empty".to_string(),
            ));
        }
        self.students
            .insert(id.to_string(), Student::new(id, name, major));
        debug!("created student {id}");
        Ok(())
    }

    /// Append a grade to a student's ledger.
    ///
    /// The category does not have to belong to the course's weight scheme;
    /// grades under foreign categories are kept but never weighted. Values
    /// outside 0-100 are rejected rather than clamped.
    pub fn record_grade(
        &mut self,
        student_id: &str,
        course_code: &str,
        category: &str,
        label: &str,
        value: f64,
    ) -> Result<(), RegistryError> {
        if !self.courses.contains_key(course_code) {
            return Err(RegistryError::course_not_found(course_code));
        }
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RegistryError::student_not_found(student_id))?;

        if !GRADE_RANGE.contains(&value) {
            return Err(RegistryError::Validation(format!(
                "grade must be between 0 and 100, got {value}"
            )));
        }
        if !self.enrollments.contains(student_id, course_code) {
            return Err(RegistryError::NotEnrolled {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            });
        }

        let entry = GradeEntry {
            category: category.to_string(),
            label: label.to_string(),
            value,
        };
        if !student.push_grade(course_code, entry) {
            return Err(RegistryError::NotEnrolled {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            });
        }
        debug!("recorded {value} for {student_id} in {course_code}/{category}");
        Ok(())
    }
}
