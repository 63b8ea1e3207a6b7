// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The persisted cache record

use serde::{Deserialize, Serialize};

use crate::config::constants::{INITIAL_COMPUTED_N, MAX_SUPPORTED_DIGITS, MAX_SUPPORTED_ID};
use crate::scan::matches_in;
use crate::types::digits::{count_digits, max_with_digits, pow10};
use crate::types::range::IdRange;
use crate::types::repetition::Repetition;
use crate::types::MatchSet;

/// Every match at or below a ceiling
///
/// `computed_keys` holds all ids in `[1, computed_n]` whose digits repeat a
/// shorter block at least twice, and nothing above `computed_n`. The ceiling
/// is either the initial `1` or a full digit width (`99`, `9999`, ...) and only
/// moves up.
///
/// Serialized as `{"computed_n": 9999, "computed_keys": [11, 22, ...]}` with
/// keys ascending. A document with neither field is an empty record; one with
/// only one of them does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct CacheRecord {
    computed_n: u64,
    computed_keys: MatchSet,
}

/// On-disk shape before the both-or-neither check
#[derive(Deserialize)]
struct StoredRecord {
    computed_n: Option<u64>,
    computed_keys: Option<MatchSet>,
}

impl TryFrom<StoredRecord> for CacheRecord {
    type Error = String;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        match (stored.computed_n, stored.computed_keys) {
            (None, None) => Ok(Self::new()),
            (Some(computed_n), Some(computed_keys)) => Ok(Self {
                computed_n,
                computed_keys,
            }),
            (Some(_), None) => Err("record has computed_n but no computed_keys".to_string()),
            (None, Some(_)) => Err("record has computed_keys but no computed_n".to_string()),
        }
    }
}

impl Default for CacheRecord {
    fn default() -> Self {
        Self {
            computed_n: INITIAL_COMPUTED_N,
            computed_keys: MatchSet::new(),
        }
    }
}

impl CacheRecord {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// The largest id below which every match is known
    pub fn computed_n(&self) -> u64 {
        self.computed_n
    }

    pub fn computed_keys(&self) -> &MatchSet {
        &self.computed_keys
    }

    pub fn into_keys(self) -> MatchSet {
        self.computed_keys
    }

    /// True when every match at or below `ceiling` is already recorded
    pub fn covers(&self, ceiling: u64) -> bool {
        ceiling <= self.computed_n
    }

    /// Enumerates `[max(1, computed_n), ceiling]` and raises the ceiling
    ///
    /// `ceiling` is rounded up to the largest id of its digit width, so
    /// `extend_to(500)` records everything up to `999`. Returns the number of
    /// newly recorded ids. Does nothing when the record already covers
    /// `ceiling`.
    pub fn extend_to(&mut self, ceiling: u64) -> usize {
        if self.covers(ceiling) {
            return 0;
        }

        let ceiling = max_with_digits(count_digits(ceiling.min(MAX_SUPPORTED_ID)));
        let from = self.computed_n.max(1);
        let before = self.computed_keys.len();
        self.computed_keys.extend(matches_in(
            IdRange::clamped(from, ceiling),
            Repetition::AtLeastTwice,
        ));
        self.computed_n = ceiling;

        self.computed_keys.len() - before
    }

    /// Checks the record invariants, returning the first violation found
    ///
    /// A record read back from storage may have been edited or truncated; one
    /// that fails here is discarded rather than trusted.
    pub fn validate(&self) -> Result<(), String> {
        let ceiling = self.computed_n;
        if ceiling > MAX_SUPPORTED_ID {
            return Err(format!(
                "ceiling {ceiling} exceeds the supported maximum {MAX_SUPPORTED_ID}"
            ));
        }
        let width = count_digits(ceiling);
        if ceiling != INITIAL_COMPUTED_N && ceiling != max_with_digits(width) {
            return Err(format!("ceiling {ceiling} is not a full digit width"));
        }
        if let Some(&last) = self.computed_keys.last() {
            if last > ceiling {
                return Err(format!("key {last} is above the ceiling {ceiling}"));
            }
        }
        if let Some(bad) = self
            .computed_keys
            .iter()
            .find(|&&id| !Repetition::AtLeastTwice.is_match(id))
        {
            return Err(format!("key {bad} is not a repeated id"));
        }

        // Keys are distinct, repeated and in range, so the count decides completeness
        let expected = repeated_count_up_to(width);
        let found = self.computed_keys.len() as u64;
        if found != expected {
            return Err(format!(
                "{found} keys recorded up to {ceiling}, expected {expected}"
            ));
        }
        Ok(())
    }
}

/// Number of ids with at most `digits` digits that repeat a shorter block
fn repeated_count_up_to(digits: u32) -> u64 {
    (2..=digits.min(MAX_SUPPORTED_DIGITS))
        .map(repeated_count_with_width)
        .sum()
}

/// Number of `width`-digit ids that repeat a shorter block
///
/// There are `9 * 10^(p-1)` ids of that width with period `p` for each divisor
/// `p` of `width`. Subtracting the ids whose period is a smaller divisor leaves
/// those with smallest period exactly `p`; the repeated ids are the ones whose
/// smallest period is a proper divisor.
fn repeated_count_with_width(width: u32) -> u64 {
    let divides = |n: u32, d: u32| n % d == 0;
    let mut primitive = vec![0u64; width as usize + 1];

    for period in (1..=width).filter(|&p| divides(width, p)) {
        let shorter: u64 = (1..period)
            .filter(|&q| divides(period, q))
            .map(|q| primitive[q as usize])
            .sum();
        primitive[period as usize] = 9 * pow10(period - 1) - shorter;
    }

    (1..width)
        .filter(|&p| divides(width, p))
        .map(|p| primitive[p as usize])
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let record = CacheRecord::new();
        assert_eq!(record.computed_n(), 1);
        assert!(record.computed_keys().is_empty());
        assert!(record.covers(1));
        assert!(!record.covers(2));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_extend_to_two_digits() {
        let mut record = CacheRecord::new();
        assert_eq!(record.extend_to(99), 9);
        assert_eq!(record.computed_n(), 99);
        assert_eq!(
            record.computed_keys().iter().copied().collect::<Vec<_>>(),
            vec![11, 22, 33, 44, 55, 66, 77, 88, 99]
        );

        // Already covered, nothing changes
        assert_eq!(record.extend_to(50), 0);
        assert_eq!(record.computed_n(), 99);
    }

    #[test]
    fn test_extend_rounds_up_to_full_width() {
        let mut record = CacheRecord::new();
        record.extend_to(500);
        assert_eq!(record.computed_n(), 999);
        assert_eq!(record.computed_keys().len(), 18);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_extend_is_incremental() {
        let mut stepwise = CacheRecord::new();
        stepwise.extend_to(999);
        stepwise.extend_to(999_999);

        let mut direct = CacheRecord::new();
        direct.extend_to(999_999);

        assert_eq!(stepwise, direct);
        assert_eq!(direct.computed_keys().len(), 1098);
    }

    #[test]
    fn test_serialized_shape() {
        let mut record = CacheRecord::new();
        record.extend_to(99);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["computed_n"], 99);
        assert_eq!(json["computed_keys"][0], 11);
        assert_eq!(json["computed_keys"][8], 99);
    }

    #[test]
    fn test_empty_document_is_empty_record() {
        let record: CacheRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, CacheRecord::new());
    }

    #[test]
    fn test_half_a_record_does_not_parse() {
        assert!(serde_json::from_str::<CacheRecord>(r#"{"computed_n": 9999}"#).is_err());
        assert!(serde_json::from_str::<CacheRecord>(r#"{"computed_keys": [11]}"#).is_err());
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let record: CacheRecord =
            serde_json::from_str(r#"{"computed_n": 99, "computed_keys": [22, 11, 22]}"#).unwrap();
        assert_eq!(record.computed_keys().len(), 2);
    }

    #[test]
    fn test_validate() {
        let mut record = CacheRecord::new();
        record.extend_to(9_999);
        assert!(record.validate().is_ok());

        let parse = |json: &str| serde_json::from_str::<CacheRecord>(json).unwrap();

        let ragged = parse(r#"{"computed_n": 50, "computed_keys": [11, 22, 33, 44]}"#);
        assert!(ragged.validate().unwrap_err().contains("full digit width"));

        let above = parse(r#"{"computed_n": 99, "computed_keys": [11, 111]}"#);
        assert!(above.validate().unwrap_err().contains("above the ceiling"));

        let bogus = parse(r#"{"computed_n": 99, "computed_keys": [11, 12]}"#);
        assert!(bogus.validate().unwrap_err().contains("not a repeated id"));

        let truncated = parse(r#"{"computed_n": 99, "computed_keys": [11, 22]}"#);
        assert!(truncated.validate().unwrap_err().contains("expected 9"));

        let empty = parse(r#"{"computed_n": 9999, "computed_keys": []}"#);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_repeated_count_matches_enumeration() {
        for digits in 1..=7 {
            let ceiling = max_with_digits(digits);
            let enumerated = matches_in(IdRange::clamped(1, ceiling), Repetition::AtLeastTwice);
            assert_eq!(
                repeated_count_up_to(digits),
                enumerated.len() as u64,
                "{digits} digits"
            );
        }
        assert_eq!(repeated_count_up_to(9), 11_007);
        assert_eq!(repeated_count_with_width(19), 9);
    }
}
