//! Pure grade computation. Nothing here touches the registry; results are
//! recomputed on every call and never cached.

use std::fmt;

use crate::errors::RegistryError;
use crate::models::{Student, WeightScheme};

/// Letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letter {
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::D => "D",
            Letter::F => "F",
        };
        f.write_str(letter)
    }
}

/// Weighted percentage for `student` in `course_code`.
///
/// Each scheme category that has at least one recorded grade contributes its
/// mean times its weight; the sum is divided by the total weight of the
/// contributing categories. Categories without grades drop out instead of
/// counting as zero. Returns 0 when nothing contributes.
pub fn course_grade(student: &Student, course_code: &str, weights: &WeightScheme) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for entry in weights.iter() {
        if let Some(average) = mean(student.category_grades(course_code, &entry.category)) {
            weighted_sum += average * entry.weight;
            weight_total += entry.weight;
        }
    }

    if weight_total > 0.0 {
        // Float rounding can push an all-100 ledger a hair past 100.
        (weighted_sum / weight_total).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Map a percentage onto A-F. Lower bounds are inclusive and no rounding is
/// applied first, so 89.99 is still a B.
pub fn letter_grade(percentage: f64) -> Letter {
    if percentage >= 90.0 {
        Letter::A
    } else if percentage >= 80.0 {
        Letter::B
    } else if percentage >= 70.0 {
        Letter::C
    } else if percentage >= 60.0 {
        Letter::D
    } else {
        Letter::F
    }
}

/// Arithmetic mean, `None` for an empty sequence.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Score needed on a final assessment weighted `final_weight` to finish with
/// `desired`, given the `current` grade. Solves
/// `desired = current * (1 - final_weight) + required * final_weight`.
pub fn predict_required_final_score(
    current: f64,
    final_weight: f64,
    desired: f64,
) -> Result<f64, RegistryError> {
    if !current.is_finite() || !desired.is_finite() {
        return Err(RegistryError::Validation(
            "current and desired grades must be numbers".to_string(),
        ));
    }
    if !final_weight.is_finite() || final_weight <= 0.0 || final_weight > 1.0 {
        return Err(RegistryError::Validation(format!(
            "final weight must be in (0, 1], got {final_weight}"
        )));
    }
    Ok((desired - current * (1.0 - final_weight)) / final_weight)
}

/// How a predicted score should be read by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Reachable,
    /// More than 100 is needed.
    Unreachable,
    /// Even a zero on the final keeps the desired grade.
    AlreadyAchieved,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub current: f64,
    pub required: f64,
    pub outcome: Outcome,
}

impl Prediction {
    pub fn new(current: f64, final_weight: f64, desired: f64) -> Result<Self, RegistryError> {
        let required = predict_required_final_score(current, final_weight, desired)?;
        let outcome = if required > 100.0 {
            Outcome::Unreachable
        } else if required < 0.0 {
            Outcome::AlreadyAchieved
        } else {
            Outcome::Reachable
        };
        Ok(Self {
            current,
            required,
            outcome,
        })
    }
}
