//! The student/course relation. `Enrollments` owns the authoritative list of
//! pairs and the two lookup views derived from it; all three change together
//! inside [`Enrollments::insert`].

use std::collections::HashMap;

use log::debug;

use crate::errors::RegistryError;

use super::Registry;

#[derive(Debug, Default, Clone)]
pub(crate) struct Enrollments {
    pairs: Vec<(String, String)>,
    by_course: HashMap<String, Vec<String>>,
    by_student: HashMap<String, Vec<String>>,
}

impl Enrollments {
    /// Record the pair. Returns `false` if it was already present.
    pub(crate) fn insert(&mut self, student_id: &str, course_code: &str) -> bool {
        if self.contains(student_id, course_code) {
            return false;
        }
        self.pairs
            .push((student_id.to_string(), course_code.to_string()));
        self.by_course
            .entry(course_code.to_string())
            .or_default()
            .push(student_id.to_string());
        self.by_student
            .entry(student_id.to_string())
            .or_default()
            .push(course_code.to_string());
        true
    }

    pub(crate) fn contains(&self, student_id: &str, course_code: &str) -> bool {
        self.by_student
            .get(student_id)
            .is_some_and(|codes| codes.iter().any(|code| code == course_code))
    }

    pub(crate) fn roster(&self, course_code: &str) -> &[String] {
        self.by_course
            .get(course_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn courses_of(&self, student_id: &str) -> &[String] {
        self.by_student
            .get(student_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(student, course)| (student.as_str(), course.as_str()))
    }
}

impl Registry {
    /// Enroll a student in a course. Both ids must exist; enrolling twice is a
    /// no-op.
    pub fn enroll(&mut self, student_id: &str, course_code: &str) -> Result<(), RegistryError> {
        if !self.courses.contains_key(course_code) {
            return Err(RegistryError::course_not_found(course_code));
        }
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RegistryError::student_not_found(student_id))?;

        student.open_course(course_code);
        if self.enrollments.insert(student_id, course_code) {
            debug!("enrolled {student_id} in {course_code}");
        }
        Ok(())
    }

    /// Whether the (student, course) pair is part of the relation.
    pub fn is_enrolled(&self, student_id: &str, course_code: &str) -> bool {
        self.enrollments.contains(student_id, course_code)
    }

    /// Student ids enrolled in `course_code`, in enrollment order. Empty for
    /// unknown courses.
    pub fn roster(&self, course_code: &str) -> &[String] {
        self.enrollments.roster(course_code)
    }

    /// Course codes `student_id` is enrolled in, in enrollment order.
    pub fn enrolled_courses(&self, student_id: &str) -> &[String] {
        self.enrollments.courses_of(student_id)
    }

    /// Enroll every student in each known course their ledger already holds,
    /// in student-id then course-code order. Ledger entries for unknown
    /// courses are left in place.
    pub(crate) fn enroll_from_ledgers(&mut self) {
        for student in self.students.values() {
            for course_code in student.ledger.keys() {
                if self.courses.contains_key(course_code) {
                    self.enrollments.insert(&student.id, course_code);
                }
            }
        }
    }

    /// Drop ledger entries that have no matching enrollment. Returns how many
    /// were removed.
    pub(crate) fn prune_unenrolled_ledgers(&mut self) -> usize {
        let enrollments = &self.enrollments;
        let mut removed = 0;
        for student in self.students.values_mut() {
            let before = student.ledger.len();
            let id = &student.id;
            student
                .ledger
                .retain(|course_code, _| enrollments.contains(id, course_code));
            removed += before - student.ledger.len();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.create_course("CS101", "Intro", 3, 1);
        registry.create_course("MA201", "Calculus", 4, 2);
        registry.create_student("21-00001", "Ada", "CS").unwrap();
        registry.create_student("21-00002", "Grace", "Math").unwrap();
        registry
    }

    #[test]
    fn enroll_updates_both_views() {
        let mut registry = registry();
        registry.enroll("21-00001", "CS101").unwrap();
        registry.enroll("21-00002", "CS101").unwrap();
        registry.enroll("21-00001", "MA201").unwrap();

        assert_eq!(registry.roster("CS101"), ["21-00001", "21-00002"]);
        assert_eq!(registry.enrolled_courses("21-00001"), ["CS101", "MA201"]);
        assert!(registry.student("21-00001").unwrap().grades_for("MA201").is_some());
        assert_eq!(registry.enrollment_pairs().count(), 3);
    }

    #[test]
    fn enroll_is_idempotent() {
        let mut registry = registry();
        registry.enroll("21-00001", "CS101").unwrap();
        registry
            .record_grade("21-00001", "CS101", "Exams", "Midterm", 75.0)
            .unwrap();
        let ledger_before = registry.student("21-00001").unwrap().clone();

        registry.enroll("21-00001", "CS101").unwrap();
        assert_eq!(registry.roster("CS101").len(), 1);
        assert_eq!(registry.student("21-00001").unwrap(), &ledger_before);
    }

    #[test]
    fn enroll_rejects_unknown_ids() {
        let mut registry = registry();
        assert_eq!(
            registry.enroll("nobody", "CS101"),
            Err(RegistryError::student_not_found("nobody"))
        );
        assert_eq!(
            registry.enroll("21-00001", "XX999"),
            Err(RegistryError::course_not_found("XX999"))
        );
        assert!(registry.roster("CS101").is_empty());
        assert!(registry.roster("XX999").is_empty());
        assert!(registry.student("21-00001").unwrap().grades_for("XX999").is_none());
    }

    #[test]
    fn ledgers_rebuild_the_relation() {
        let mut registry = registry();
        for (student_id, course_code) in [
            ("21-00002", "MA201"),
            ("21-00001", "MA201"),
            ("21-00001", "CS101"),
            ("21-00001", "GONE"),
        ] {
            registry
                .students
                .get_mut(student_id)
                .unwrap()
                .open_course(course_code);
        }

        registry.enroll_from_ledgers();
        assert_eq!(registry.enrolled_courses("21-00001"), ["CS101", "MA201"]);
        assert_eq!(registry.roster("MA201"), ["21-00001", "21-00002"]);
        assert!(registry.roster("GONE").is_empty());
        assert!(registry.student("21-00001").unwrap().grades_for("GONE").is_some());
    }

    #[test]
    fn prune_drops_ledgers_without_enrollment() {
        let mut registry = registry();
        registry.enroll("21-00001", "CS101").unwrap();
        registry
            .students
            .get_mut("21-00002")
            .unwrap()
            .open_course("MA201");

        assert_eq!(registry.prune_unenrolled_ledgers(), 1);
        assert!(registry.student("21-00002").unwrap().grades_for("MA201").is_none());
        assert!(registry.student("21-00001").unwrap().grades_for("CS101").is_some());
    }
}
