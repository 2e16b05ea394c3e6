//! Compound equality filter over the full dataset.

use crate::dataset::Record;
use crate::filter::Dimension;

/// The value chosen for each filter control. `None` or an empty string means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub region: Option<String>,
    pub rw: Option<String>,
    pub rt: Option<String>,
}

impl FilterSelection {
    /// Selection with every dimension set to "all".
    pub fn all() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        let value = match dimension {
            Dimension::Region => &self.region,
            Dimension::Rw => &self.rw,
            Dimension::Rt => &self.rt,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, dimension: Dimension, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match dimension {
            Dimension::Region => self.region = value,
            Dimension::Rw => self.rw = value,
            Dimension::Rt => self.rt = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.get(*d).is_none())
    }

    /// Whether a record passes every active dimension.
    ///
    /// Missing or falsy fields compare as `""`; equality is exact and case-sensitive.
    pub fn matches(&self, record: &Record) -> bool {
        Dimension::ALL.iter().all(|&dimension| match self.get(dimension) {
            None => true,
            Some(selected) => record.text_or_empty(dimension.field()) == selected,
        })
    }
}

/// Indices of the rows passing `selection`, in dataset order.
pub fn apply_filters(dataset: &[Record], selection: &FilterSelection) -> Vec<usize> {
    dataset
        .iter()
        .enumerate()
        .filter(|(_, record)| selection.matches(record))
        .map(|(index, _)| index)
        .collect()
}
