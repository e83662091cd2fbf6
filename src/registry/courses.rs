use log::debug;

use crate::errors::RegistryError;
use crate::models::{Course, WeightScheme};

use super::Registry;

impl Registry {
    /// Create (or replace) a course using one of the fixed weight presets.
    /// Never fails; the last write for a code wins and its roster is kept.
    pub fn create_course(
        &mut self,
        code: &str,
        name: &str,
        credits: u32,
        preset: u32,
    ) -> &Course {
        self.put_course(code, name, credits, WeightScheme::from_preset(preset))
    }

    /// Create (or replace) a course with an explicit weight scheme.
    pub fn create_course_with_weights(
        &mut self,
        code: &str,
        name: &str,
        credits: u32,
        weights: WeightScheme,
    ) -> Result<&Course, RegistryError> {
        if code.trim().is_empty() {
            return Err(RegistryError::Validation(
                "course code must not be empty".to_string(),
            ));
        }
        Ok(self.put_course(code, name, credits, weights))
    }

    /// Weight scheme of `code`, empty when the course is unknown.
    pub fn weights_for(&self, code: &str) -> WeightScheme {
        self.courses
            .get(code)
            .map(|course| course.weights.clone())
            .unwrap_or_default()
    }

    /// Category names of `code` in scheme order, empty when unknown.
    pub fn assignment_categories(&self, code: &str) -> Vec<String> {
        self.courses
            .get(code)
            .map(|course| course.weights.categories())
            .unwrap_or_default()
    }

    fn put_course(
        &mut self,
        code: &str,
        name: &str,
        credits: u32,
        weights: WeightScheme,
    ) -> &Course {
        if self.courses.contains_key(code) {
            debug!("replacing course {code}");
        } else {
            debug!("creating course {code} with {} categories", weights.len());
        }
        self.courses.insert(
            code.to_string(),
            Course {
                code: code.to_string(),
                name: name.to_string(),
                credits,
                weights,
            },
        );
        &self.courses[code]
    }
}
