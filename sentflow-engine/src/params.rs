//! Per-unit parameters
//!
//! Scheduler thresholds vary with how many units were already emitted. The
//! last value keeps applying once the list runs out.

use serde::{Deserialize, Serialize};

/// Non-empty list indexed by emitted-unit count, clamped at the end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PerUnitRepr<T>", into = "Vec<T>")]
pub struct PerUnit<T: Clone>(Vec<T>);

/// Accepts either a bare value or a list in configuration files
#[derive(Deserialize)]
#[serde(untagged)]
enum PerUnitRepr<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone> From<PerUnitRepr<T>> for PerUnit<T> {
    fn from(repr: PerUnitRepr<T>) -> Self {
        match repr {
            PerUnitRepr::One(value) => PerUnit(vec![value]),
            PerUnitRepr::Many(values) => PerUnit(values),
        }
    }
}

impl<T: Clone> From<PerUnit<T>> for Vec<T> {
    fn from(values: PerUnit<T>) -> Self {
        values.0
    }
}

impl<T: Clone> PerUnit<T> {
    /// Wrap a list of values
    pub fn new(values: Vec<T>) -> Self {
        Self(values)
    }

    /// Single value used for every unit
    pub fn constant(value: T) -> Self {
        Self(vec![value])
    }

    /// Value for the unit with index `n`. `None` only when the list is empty,
    /// which validation rules out.
    pub fn get(&self, n: usize) -> Option<&T> {
        self.0.get(n).or_else(|| self.0.last())
    }

    /// Whether the list holds no values
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All configured values
    pub fn values(&self) -> &[T] {
        &self.0
    }
}

impl<T: Clone> From<Vec<T>> for PerUnit<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}
