//! Derivation of the values offered by each filter control.

use crate::dataset::Record;
use crate::filter::Dimension;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Sorted, de-duplicated values per filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSets {
    pub region: Vec<String>,
    pub rw: Vec<String>,
    pub rt: Vec<String>,
}

impl OptionSets {
    pub fn get(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Region => &self.region,
            Dimension::Rw => &self.rw,
            Dimension::Rt => &self.rt,
        }
    }
}

/// Scan the full dataset once and collect the option set for every dimension.
pub fn derive_options(dataset: &[Record]) -> OptionSets {
    OptionSets {
        region: derive_dimension(dataset, Dimension::Region),
        rw: derive_dimension(dataset, Dimension::Rw),
        rt: derive_dimension(dataset, Dimension::Rt),
    }
}

fn derive_dimension(dataset: &[Record], dimension: Dimension) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for record in dataset {
        if let Some(value) = record.truthy_text(dimension.field()) {
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
    }
    sort_options(&mut values);
    values
}

/// Numeric order when every value parses as an integer, locale-style text order otherwise.
///
/// The decision covers the whole set: one non-numeric value switches every value to text
/// order.
pub fn sort_options(values: &mut [String]) {
    let numbers: Option<Vec<i64>> = values.iter().map(|v| parse_leading_int(v)).collect();
    match numbers {
        Some(numbers) => {
            let mut keyed: Vec<(i64, String)> =
                numbers.into_iter().zip(values.iter().cloned()).collect();
            keyed.sort_by_key(|(n, _)| *n);
            for (slot, (_, value)) in values.iter_mut().zip(keyed) {
                *slot = value;
            }
        }
        None => values.sort_by(|a, b| locale_compare(a, b)),
    }
}

/// Integer prefix of a string, the way spreadsheet front ends read "12", " 7", "-3" or "5a".
///
/// Leading whitespace and a single sign are allowed; at least one digit must follow.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    // Saturate absurdly long digit runs instead of rejecting them
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Case-insensitive comparison with lowercase sorting ahead of uppercase on ties.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary.then_with(|| a.chars().map(swap_case).cmp(b.chars().map(swap_case)))
}

fn swap_case(c: char) -> char {
    if c.is_ascii_uppercase() {
        c.to_ascii_lowercase()
    } else if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::{RT, RW, WILAYAH};
    use crate::dataset::CellValue;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_numeric_sets_sort_numerically() {
        let mut values = strings(&["10", "2", "1"]);
        sort_options(&mut values);
        assert_eq!(values, strings(&["1", "2", "10"]));
    }

    #[test]
    fn test_mixed_sets_fall_back_to_text_order() {
        let mut values = strings(&["10", "2", "Blok A"]);
        sort_options(&mut values);
        assert_eq!(values, strings(&["10", "2", "Blok A"]));

        let mut values = strings(&["b", "A", "a", "B"]);
        sort_options(&mut values);
        assert_eq!(values, strings(&["a", "A", "b", "B"]));
    }

    #[test]
    fn test_numeric_ties_keep_first_seen_order() {
        let mut values = strings(&["01", "3", "1"]);
        sort_options(&mut values);
        assert_eq!(values, strings(&["01", "1", "3"]));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("5a"), Some(5));
        assert_eq!(parse_leading_int("a5"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_derive_options_dedups_and_skips_falsy() {
        let dataset = vec![
            Record::new().with(WILAYAH, "Cibinong").with(RT, 3i64).with(RW, "02"),
            Record::new().with(WILAYAH, "Bojong").with(RT, 1i64).with(RW, "02"),
            Record::new().with(WILAYAH, "Cibinong").with(RT, 0i64),
            Record::new().with(RT, CellValue::Float(10.0)),
        ];

        let options = derive_options(&dataset);
        assert_eq!(options.region, strings(&["Bojong", "Cibinong"]));
        assert_eq!(options.rt, strings(&["1", "3", "10"]));
        assert_eq!(options.rw, strings(&["02"]));
        assert_eq!(options.get(Dimension::Rt), options.rt.as_slice());
    }

    #[test]
    fn test_derive_options_is_deterministic() {
        let dataset = vec![
            Record::new().with(WILAYAH, "b"),
            Record::new().with(WILAYAH, "a"),
        ];
        assert_eq!(derive_options(&dataset), derive_options(&dataset));
    }
}
