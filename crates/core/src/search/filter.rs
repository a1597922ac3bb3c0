//! Attribute filter over character results.

use super::types::CharacterRecord;

/// Optional power range and alignment filter.
///
/// A power bound of `0` is treated the same as an absent bound, so an explicit
/// `powerMin=0` cannot be expressed. Bounds are inclusive. When any power
/// bound is active, characters whose power is not an integer are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFilter {
    power_min: Option<i64>,
    power_max: Option<i64>,
    category: Option<String>,
}

impl CharacterFilter {
    /// Build a filter from raw request values, where `0` and `""` mean "unset".
    pub fn from_raw(power_min: i64, power_max: i64, category: &str) -> Self {
        Self {
            power_min: (power_min != 0).then_some(power_min),
            power_max: (power_max != 0).then_some(power_max),
            category: (!category.is_empty()).then(|| category.to_string()),
        }
    }

    pub fn with_power_min(mut self, min: Option<i64>) -> Self {
        self.power_min = min.filter(|v| *v != 0);
        self
    }

    pub fn with_power_max(mut self, max: Option<i64>) -> Self {
        self.power_max = max.filter(|v| *v != 0);
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category.filter(|c| !c.is_empty());
        self
    }

    pub fn power_min(&self) -> Option<i64> {
        self.power_min
    }

    pub fn power_max(&self) -> Option<i64> {
        self.power_max
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// True when the filter keeps every character.
    pub fn is_noop(&self) -> bool {
        !self.has_power_bound() && self.category.is_none()
    }

    fn has_power_bound(&self) -> bool {
        self.power_min.is_some() || self.power_max.is_some()
    }

    pub fn matches(&self, character: &CharacterRecord) -> bool {
        if self.has_power_bound() {
            let Some(power) = character.power_value() else {
                return false;
            };
            if self.power_min.is_some_and(|min| power < min) {
                return false;
            }
            if self.power_max.is_some_and(|max| power > max) {
                return false;
            }
        }

        match &self.category {
            Some(category) => character.alignment == *category,
            None => true,
        }
    }

    /// Keep the characters that match, in their original order.
    pub fn apply(&self, characters: Vec<CharacterRecord>) -> Vec<CharacterRecord> {
        if self.is_noop() {
            return characters;
        }
        characters.into_iter().filter(|c| self.matches(c)).collect()
    }
}
