use std::fs;

use grade_tracker::{letter_grade, load, save, Letter, Registry, StoreError, WeightScheme};
use tempfile::tempdir;

fn populated_registry() -> Registry {
    let mut registry = Registry::new();
    registry.create_course("CS101", "Intro to Programming", 3, 1);
    registry.create_course("MA201", "Linear Algebra", 4, 2);
    registry
        .create_course_with_weights(
            "PH110",
            "Physics Lab",
            2,
            WeightScheme::custom([("Labs", 0.35), ("Reports", 0.65)]).unwrap(),
        )
        .unwrap();

    registry.create_student("21-00001", "Ada Lovelace", "Computer Science").unwrap();
    registry.create_student("21-00002", "Grace Hopper", "Mathematics").unwrap();
    registry.create_student("21-00003", "Alan Turing", "Logic").unwrap();

    for (student, course) in [
        ("21-00001", "CS101"),
        ("21-00001", "MA201"),
        ("21-00002", "CS101"),
        ("21-00002", "PH110"),
        ("21-00003", "MA201"),
    ] {
        registry.enroll(student, course).unwrap();
    }

    for (student, course, category, label, value) in [
        ("21-00001", "CS101", "Homework", "HW1", 80.0),
        ("21-00001", "CS101", "Homework", "HW2", 90.0),
        ("21-00001", "CS101", "Exams", "Midterm", 70.0),
        ("21-00001", "MA201", "Projects", "Eigen project", 93.25),
        ("21-00002", "CS101", "Quizzes", "Quiz 1", 66.67),
        ("21-00002", "CS101", "Participation", "Week 1", 100.0),
        ("21-00002", "PH110", "Labs", "Pendulum", 88.8),
        ("21-00002", "PH110", "Reports", "Pendulum write-up", 71.1),
        ("21-00003", "MA201", "Exams", "Final", 59.99),
    ] {
        registry
            .record_grade(student, course, category, label, value)
            .unwrap();
    }
    registry
}

#[test]
fn save_then_load_preserves_grades_and_rosters() {
    let dir = tempdir().unwrap();
    let original = populated_registry();
    save(&original, dir.path()).unwrap();

    let restored = load(dir.path()).unwrap();

    for course in original.courses() {
        let code = course.code();
        assert_eq!(restored.course(code), Some(course));
        assert_eq!(restored.roster(code), original.roster(code));

        for student_id in original.roster(code) {
            assert_eq!(
                restored.course_grade(student_id, code).unwrap(),
                original.course_grade(student_id, code).unwrap(),
                "{student_id} in {code}"
            );
        }
    }
    for student in original.students() {
        assert_eq!(restored.student(student.id()), Some(student));
        assert_eq!(
            restored.enrolled_courses(student.id()),
            original.enrolled_courses(student.id())
        );
    }
}

#[test]
fn saved_directory_contains_expected_exports() {
    let dir = tempdir().unwrap();
    save(&populated_registry(), dir.path()).unwrap();

    let grades = fs::read_to_string(dir.path().join("grades.csv")).unwrap();
    assert!(grades.starts_with("StudentID,CourseCode,AssignmentType,AssignmentName,Grade\n"));
    assert!(grades.contains("21-00002,CS101,Quizzes,Quiz 1,66.67\n"));
    assert!(grades.contains("21-00003,MA201,Exams,Final,59.99\n"));
    assert_eq!(grades.lines().count(), 10);

    let courses = fs::read_to_string(dir.path().join("courses.csv")).unwrap();
    assert!(courses.contains("PH110,Physics Lab,2,Labs:0.35;Reports:0.65\n"));

    let enrollments = fs::read_to_string(dir.path().join("enrollments.csv")).unwrap();
    assert_eq!(enrollments.lines().count(), 6);
}

#[test]
fn end_to_end_weighted_grade() {
    let registry = populated_registry();
    let grade = registry.course_grade("21-00001", "CS101").unwrap();
    assert!((grade - 73.57).abs() < 0.01);
    assert_eq!(letter_grade(grade), Letter::C);

    let failing = registry.course_grade("21-00003", "MA201").unwrap();
    assert!((failing - 59.99).abs() < 1e-9);
    assert_eq!(letter_grade(failing), Letter::F);
}

#[test]
fn failed_load_leaves_existing_registry_alone() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("students.json"), r#"{"version": 9, "students": []}"#).unwrap();

    let mut registry = populated_registry();
    match load(dir.path()) {
        Ok(loaded) => registry = loaded,
        Err(StoreError::UnsupportedVersion { found, .. }) => assert_eq!(found, 9),
        Err(other) => panic!("unexpected error: {other}"),
    }
    assert_eq!(registry.students().count(), 3);
}

#[test]
fn save_fails_when_base_is_a_file() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    assert!(matches!(
        save(&populated_registry(), &blocker),
        Err(StoreError::Io { .. })
    ));
}
