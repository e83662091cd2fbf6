//! Domain models handed around by the registry, the grading engine and the
//! store. Fields are crate-private so every mutation goes through
//! [`crate::registry::Registry`]; outside callers read through the accessors.

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::RegistryError;

/// One category of a weight scheme together with its fractional weight.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWeight {
    /// Assignment category, e.g. `Exams`.
    pub category: String,
    /// Fractional contribution of the category.
    pub weight: f64,
}

/// Ordered mapping from assignment category to weight. Weights are not
/// required to sum to 1.0; the grading engine normalizes by the weights it
/// actually observes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightScheme {
    entries: Vec<CategoryWeight>,
}

impl WeightScheme {
    /// Build one of the fixed presets offered at course creation.
    ///
    /// Preset 3 is the "custom" slot and registers no categories; callers who
    /// want real custom weights go through [`WeightScheme::custom`].
    pub fn from_preset(preset: u32) -> Self {
        let pairs: &[(&str, f64)] = match preset {
            1 => &[("Homework", 0.20), ("Quizzes", 0.30), ("Exams", 0.50)],
            2 => &[("Projects", 0.40), ("Exams", 0.60)],
            3 => &[],
            _ => &[("Assignments", 1.0)],
        };
        Self {
            entries: pairs
                .iter()
                .map(|(category, weight)| CategoryWeight {
                    category: (*category).to_string(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    /// Build a scheme from caller-supplied pairs, keeping their order.
    pub fn custom<I, S>(pairs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut entries: Vec<CategoryWeight> = Vec::new();
        for (category, weight) in pairs {
            let category = category.into();
            let trimmed = category.trim();
            if trimmed.is_empty() {
                return Err(RegistryError::Validation(
                    "category name must not be empty".to_string(),
                ));
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(RegistryError::Validation(format!(
                    "weight for '{trimmed}' must be a non-negative number"
                )));
            }
            if entries.iter().any(|entry| entry.category == trimmed) {
                return Err(RegistryError::Validation(format!(
                    "category '{trimmed}' listed twice"
                )));
            }
            entries.push(CategoryWeight {
                category: trimmed.to_string(),
                weight,
            });
        }
        Ok(Self { entries })
    }

    pub(crate) fn from_entries(entries: Vec<CategoryWeight>) -> Self {
        Self { entries }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryWeight> {
        self.entries.iter()
    }

    /// Category names in insertion order.
    pub fn categories(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.category.clone()).collect()
    }

    /// Weight of `category`, `None` when the scheme does not list it.
    pub fn weight_of(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.weight)
    }

    /// True for the "custom" preset, which registers no categories.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for WeightScheme {
    /// `category:weight` pairs joined by `;`, the shape used by the course
    /// export.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", entry.category, entry.weight)?;
        }
        Ok(())
    }
}

/// A course definition. Immutable once created; re-creating a course with the
/// same code replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Unique course code, the catalog key.
    pub(crate) code: String,
    /// Display name.
    pub(crate) name: String,
    /// Credit hours.
    pub(crate) credits: u32,
    /// Weight scheme chosen at creation.
    pub(crate) weights: WeightScheme,
}

impl Course {
    /// Unique course code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name shown next to the code in reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Credit hours; informational only, never used in grading.
    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Weight scheme the grading engine applies to this course.
    pub fn weights(&self) -> &WeightScheme {
        &self.weights
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

/// A single recorded grade. The assignment label travels with the value so
/// exports never have to line up two parallel lists.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeEntry {
    /// Category the grade was recorded under.
    pub category: String,
    /// Assignment display name, e.g. `Midterm`.
    pub label: String,
    /// Score between 0 and 100 inclusive.
    pub value: f64,
}

/// A student and their grade ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    /// SR-Code, unique across the registry.
    pub(crate) id: String,
    /// Full name.
    pub(crate) name: String,
    /// Declared major, informational only.
    pub(crate) major: String,
    /// Course code -> grades in recording order. A key exists only once the
    /// student is enrolled in that course.
    pub(crate) ledger: BTreeMap<String, Vec<GradeEntry>>,
}

impl Student {
    pub(crate) fn new(id: &str, name: &str, major: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            major: major.to_string(),
            ledger: BTreeMap::new(),
        }
    }

    /// The SR-Code.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared major.
    pub fn major(&self) -> &str {
        &self.major
    }

    /// Every grade recorded for `course_code`, or `None` when the ledger has
    /// no entry for that course.
    pub fn grades_for(&self, course_code: &str) -> Option<&[GradeEntry]> {
        self.ledger.get(course_code).map(Vec::as_slice)
    }

    /// Ledger entries ordered by course code.
    pub fn ledger(&self) -> impl Iterator<Item = (&str, &[GradeEntry])> {
        self.ledger
            .iter()
            .map(|(course_code, grades)| (course_code.as_str(), grades.as_slice()))
    }

    /// Values recorded under one category of one course, in recording order.
    pub fn category_grades<'a>(
        &'a self,
        course_code: &str,
        category: &'a str,
    ) -> impl Iterator<Item = f64> + 'a {
        self.ledger
            .get(course_code)
            .into_iter()
            .flatten()
            .filter(move |entry| entry.category == category)
            .map(|entry| entry.value)
    }

    pub(crate) fn open_course(&mut self, course_code: &str) {
        self.ledger.entry(course_code.to_string()).or_default();
    }

    /// Append to an already opened course. Returns `false` when the ledger has
    /// no entry for the course.
    pub(crate) fn push_grade(&mut self, course_code: &str, entry: GradeEntry) -> bool {
        match self.ledger.get_mut(course_code) {
            Some(grades) => {
                grades.push(entry);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
