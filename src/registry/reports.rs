//! Read-only views assembled from the registry for whatever front end renders
//! them. Grades are computed on demand every time.

use crate::errors::RegistryError;
use crate::grading::{self, Letter, Prediction};

use super::Registry;

/// Average of one category inside a [`CourseStanding`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    /// Category name as it was recorded, whether or not the scheme weights it.
    pub category: String,
    /// Mean of the recorded values.
    pub average: f64,
    /// Number of recorded grades.
    pub count: usize,
}

/// One enrolled course inside a [`StudentReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct CourseStanding {
    pub course_code: String,
    pub course_name: String,
    /// Weighted percentage, 0 while no weighted category has grades.
    pub percentage: f64,
    pub letter: Letter,
    /// Categories in the order they were first recorded.
    pub categories: Vec<CategorySummary>,
}

/// Everything a front end needs to show one student's standing.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentReport {
    pub student_id: String,
    pub name: String,
    pub major: String,
    /// One entry per enrolled course, in enrollment order.
    pub courses: Vec<CourseStanding>,
}

/// One enrolled student inside a [`CourseReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub student_id: String,
    pub name: String,
    /// Weighted percentage in the reported course.
    pub percentage: f64,
    pub letter: Letter,
}

/// Spread of the weighted percentages across a course roster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseStatistics {
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
}

impl CourseStatistics {
    fn from_grades(grades: &[f64]) -> Option<Self> {
        let average = grading::mean(grades.iter().copied())?;
        let highest = grades.iter().copied().fold(f64::MIN, f64::max);
        let lowest = grades.iter().copied().fold(f64::MAX, f64::min);
        Some(Self {
            average,
            highest,
            lowest,
        })
    }
}

/// Roster and grade spread of one course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseReport {
    pub course_code: String,
    pub course_name: String,
    pub credits: u32,
    /// Enrolled students in enrollment order.
    pub roster: Vec<RosterEntry>,
    /// `None` while nobody is enrolled.
    pub statistics: Option<CourseStatistics>,
}

/// Enrollment count of one course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseEnrollment {
    pub course_code: String,
    pub course_name: String,
    pub enrolled: usize,
}

/// Enrollment count of one student.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentEnrollment {
    pub student_id: String,
    pub name: String,
    pub enrolled: usize,
}

/// Registry-wide totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_students: usize,
    pub total_courses: usize,
    pub total_enrollments: usize,
    /// Enrollments divided by students, 0 when there are no students.
    pub average_courses_per_student: f64,
    /// Up to [`POPULAR_COURSE_LIMIT`] courses with at least one enrollment,
    /// largest roster first, ties broken by course code.
    pub most_popular: Vec<CourseEnrollment>,
    /// Every course ordered by code.
    pub courses: Vec<CourseEnrollment>,
    /// Every student ordered by id.
    pub students: Vec<StudentEnrollment>,
}

/// How many courses [`Overview::most_popular`] lists.
pub const POPULAR_COURSE_LIMIT: usize = 3;

impl Registry {
    /// Weighted percentage of one student in one course.
    pub fn course_grade(
        &self,
        student_id: &str,
        course_code: &str,
    ) -> Result<f64, RegistryError> {
        let course = self
            .courses
            .get(course_code)
            .ok_or_else(|| RegistryError::course_not_found(course_code))?;
        let student = self
            .students
            .get(student_id)
            .ok_or_else(|| RegistryError::student_not_found(student_id))?;
        Ok(grading::course_grade(student, course_code, &course.weights))
    }

    pub fn student_report(&self, student_id: &str) -> Result<StudentReport, RegistryError> {
        let student = self
            .students
            .get(student_id)
            .ok_or_else(|| RegistryError::student_not_found(student_id))?;

        let mut courses = Vec::new();
        for course_code in self.enrolled_courses(student_id) {
            let Some(course) = self.courses.get(course_code) else {
                continue;
            };
            let percentage = grading::course_grade(student, course_code, &course.weights);

            let mut categories: Vec<CategorySummary> = Vec::new();
            for entry in student.grades_for(course_code).unwrap_or_default() {
                if categories.iter().any(|summary| summary.category == entry.category) {
                    continue;
                }
                let values: Vec<f64> = student
                    .category_grades(course_code, &entry.category)
                    .collect();
                categories.push(CategorySummary {
                    category: entry.category.clone(),
                    average: grading::mean(values.iter().copied()).unwrap_or(0.0),
                    count: values.len(),
                });
            }

            courses.push(CourseStanding {
                course_code: course_code.clone(),
                course_name: course.name.clone(),
                percentage,
                letter: grading::letter_grade(percentage),
                categories,
            });
        }

        Ok(StudentReport {
            student_id: student.id.clone(),
            name: student.name.clone(),
            major: student.major.clone(),
            courses,
        })
    }

    pub fn course_report(&self, course_code: &str) -> Result<CourseReport, RegistryError> {
        let course = self
            .courses
            .get(course_code)
            .ok_or_else(|| RegistryError::course_not_found(course_code))?;

        let roster: Vec<RosterEntry> = self
            .roster(course_code)
            .iter()
            .filter_map(|student_id| self.students.get(student_id))
            .map(|student| {
                let percentage = grading::course_grade(student, course_code, &course.weights);
                RosterEntry {
                    student_id: student.id.clone(),
                    name: student.name.clone(),
                    percentage,
                    letter: grading::letter_grade(percentage),
                }
            })
            .collect();

        let percentages: Vec<f64> = roster.iter().map(|entry| entry.percentage).collect();
        Ok(CourseReport {
            course_code: course.code.clone(),
            course_name: course.name.clone(),
            credits: course.credits,
            statistics: CourseStatistics::from_grades(&percentages),
            roster,
        })
    }

    /// Totals, per-entity enrollment counts and the most popular courses.
    pub fn overview(&self) -> Overview {
        let courses: Vec<CourseEnrollment> = self
            .courses
            .values()
            .map(|course| CourseEnrollment {
                course_code: course.code.clone(),
                course_name: course.name.clone(),
                enrolled: self.roster(&course.code).len(),
            })
            .collect();
        let students: Vec<StudentEnrollment> = self
            .students
            .values()
            .map(|student| StudentEnrollment {
                student_id: student.id.clone(),
                name: student.name.clone(),
                enrolled: self.enrolled_courses(&student.id).len(),
            })
            .collect();

        let mut most_popular: Vec<CourseEnrollment> = courses
            .iter()
            .filter(|course| course.enrolled > 0)
            .cloned()
            .collect();
        most_popular.sort_by(|a, b| {
            b.enrolled
                .cmp(&a.enrolled)
                .then_with(|| a.course_code.cmp(&b.course_code))
        });
        most_popular.truncate(POPULAR_COURSE_LIMIT);

        let total_enrollments = self.enrollment_pairs().count();
        let average_courses_per_student = if students.is_empty() {
            0.0
        } else {
            total_enrollments as f64 / students.len() as f64
        };

        Overview {
            total_students: students.len(),
            total_courses: courses.len(),
            total_enrollments,
            average_courses_per_student,
            most_popular,
            courses,
            students,
        }
    }

    /// Run the final-score predictor against the student's current grade.
    pub fn predict_for(
        &self,
        student_id: &str,
        course_code: &str,
        final_weight: f64,
        desired: f64,
    ) -> Result<Prediction, RegistryError> {
        let current = self.course_grade(student_id, course_code)?;
        Prediction::new(current, final_weight, desired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::Outcome;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.create_course("CS101", "Intro", 3, 1);
        registry.create_course("ART1", "Drawing", 2, 7);
        registry.create_student("21-00001", "Ada", "CS").unwrap();
        registry.create_student("21-00002", "Grace", "Math").unwrap();
        registry.enroll("21-00001", "CS101").unwrap();
        registry.enroll("21-00002", "CS101").unwrap();
        registry.enroll("21-00001", "ART1").unwrap();

        for (category, label, value) in [
            ("Exams", "Midterm", 70.0),
            ("Homework", "HW1", 80.0),
            ("Homework", "HW2", 90.0),
        ] {
            registry
                .record_grade("21-00001", "CS101", category, label, value)
                .unwrap();
        }
        registry
            .record_grade("21-00002", "CS101", "Quizzes", "Q1", 95.0)
            .unwrap();
        registry
    }

    #[test]
    fn student_report_lists_categories_in_recorded_order() {
        let report = registry().student_report("21-00001").unwrap();
        assert_eq!(report.name, "Ada");
        assert_eq!(report.courses.len(), 2);

        let cs = &report.courses[0];
        assert_eq!(cs.course_code, "CS101");
        assert_eq!(cs.letter, Letter::C);
        let names: Vec<&str> = cs.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Exams", "Homework"]);
        assert_eq!(cs.categories[1].average, 85.0);
        assert_eq!(cs.categories[1].count, 2);

        let art = &report.courses[1];
        assert_eq!(art.percentage, 0.0);
        assert!(art.categories.is_empty());
    }

    #[test]
    fn course_report_computes_statistics() {
        let report = registry().course_report("CS101").unwrap();
        assert_eq!(report.roster.len(), 2);
        assert!((report.roster[1].percentage - 95.0).abs() < 1e-9);
        assert_eq!(report.roster[1].letter, Letter::A);

        let stats = report.statistics.unwrap();
        assert!((stats.highest - 95.0).abs() < 1e-9);
        assert!((stats.lowest - 73.571).abs() < 0.001);
        assert!((stats.average - (stats.highest + stats.lowest) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn empty_course_has_no_statistics() {
        let mut registry = registry();
        registry.create_course("EMPTY", "Nobody here", 1, 1);
        let report = registry.course_report("EMPTY").unwrap();
        assert!(report.roster.is_empty());
        assert!(report.statistics.is_none());
        assert!(registry.course_report("MISSING").is_err());
    }

    #[test]
    fn overview_counts_and_ranks_courses() {
        let mut registry = registry();
        registry.create_course("BIO1", "Biology", 3, 2);
        registry.create_course("ZOO1", "Zoology", 3, 2);
        registry.create_course("IDLE", "Nobody", 1, 1);
        registry.enroll("21-00002", "BIO1").unwrap();
        registry.enroll("21-00002", "ZOO1").unwrap();

        let overview = registry.overview();
        assert_eq!(overview.total_students, 2);
        assert_eq!(overview.total_courses, 5);
        assert_eq!(overview.total_enrollments, 5);
        assert!((overview.average_courses_per_student - 2.5).abs() < 1e-9);

        let popular: Vec<(&str, usize)> = overview
            .most_popular
            .iter()
            .map(|course| (course.course_code.as_str(), course.enrolled))
            .collect();
        assert_eq!(popular, vec![("CS101", 2), ("ART1", 1), ("BIO1", 1)]);

        let idle = overview
            .courses
            .iter()
            .find(|course| course.course_code == "IDLE")
            .unwrap();
        assert_eq!(idle.enrolled, 0);
        let counts: Vec<usize> = overview.students.iter().map(|s| s.enrolled).collect();
        assert_eq!(counts, vec![2, 3]);
    }

    #[test]
    fn empty_overview_has_zero_average() {
        let overview = Registry::new().overview();
        assert_eq!(overview.total_students, 0);
        assert_eq!(overview.total_courses, 0);
        assert_eq!(overview.total_enrollments, 0);
        assert_eq!(overview.average_courses_per_student, 0.0);
        assert!(overview.most_popular.is_empty());
        assert!(overview.courses.is_empty());
    }

    #[test]
    fn predictor_uses_current_grade() {
        let registry = registry();
        let prediction = registry.predict_for("21-00002", "CS101", 0.5, 90.0).unwrap();
        assert!((prediction.current - 95.0).abs() < 1e-9);
        assert!((prediction.required - 85.0).abs() < 1e-9);
        assert_eq!(prediction.outcome, Outcome::Reachable);

        assert!(matches!(
            registry.predict_for("21-00002", "CS101", 0.0, 90.0),
            Err(RegistryError::Validation(_))
        ));
    }
}
