//! Rubric definitions and entry aggregation.
//!
//! A rubric is a named presentation bucket on a statement. Each statement side
//! defines its rubrics as a closed enum implementing [`Rubric`], so the set of
//! rubric names is checked at compile time instead of living in string keys.

use std::collections::BTreeMap;
use std::fmt::Debug;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::classifier::ClassSet;
use crate::ledger::{AccountCode, Entry};

/// A closed set of rubrics for one statement side.
///
/// Class sets of the variants must be disjoint: an entry lands in at most one
/// rubric of a given enum.
pub trait Rubric: Copy + Ord + Debug + Serialize + Send + Sync + 'static {
    /// Every rubric, in presentation order.
    const ALL: &'static [Self];

    /// Account classes routed to this rubric.
    fn classes(self) -> ClassSet;

    /// Statutory title of the rubric.
    fn title(self) -> &'static str;

    /// Finds the rubric an account code belongs to.
    fn of(code: &AccountCode) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|rubric| rubric.classes().contains(code))
    }
}

/// Entries of one rubric and their sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RubricTotal {
    /// Entries in input order.
    #[serde(rename = "lignes")]
    pub lines: Vec<Entry>,
    /// Sum of the entry amounts.
    pub total: Decimal,
}

impl RubricTotal {
    fn push(&mut self, entry: Entry) {
        self.total += entry.amount;
        self.lines.push(entry);
    }

    /// Returns true if no entry was routed here.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Entries partitioned by rubric, with the grand total.
///
/// Every rubric of `R` is present, even when empty. Serializes as a map keyed
/// by rubric name in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rubrics<R: Rubric> {
    sections: BTreeMap<R, RubricTotal>,
    total: Decimal,
}

impl<R: Rubric> Default for Rubrics<R> {
    fn default() -> Self {
        Self {
            sections: R::ALL
                .iter()
                .map(|rubric| (*rubric, RubricTotal::default()))
                .collect(),
            total: Decimal::ZERO,
        }
    }
}

impl<R: Rubric> Rubrics<R> {
    /// Grand total over all rubrics.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Returns the section of a rubric.
    #[must_use]
    pub fn get(&self, rubric: R) -> &RubricTotal {
        // Every variant is inserted by `default()`.
        &self.sections[&rubric]
    }

    /// Sum of one rubric.
    #[must_use]
    pub fn total_of(&self, rubric: R) -> Decimal {
        self.get(rubric).total
    }

    /// Sum of the rubrics selected by `filter`.
    #[must_use]
    pub fn total_where(&self, filter: impl Fn(R) -> bool) -> Decimal {
        self.sections
            .iter()
            .filter(|(rubric, _)| filter(**rubric))
            .map(|(_, section)| section.total)
            .sum()
    }

    /// Iterates rubrics in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (R, &RubricTotal)> {
        self.sections.iter().map(|(rubric, section)| (*rubric, section))
    }

    /// Adds an entry to a rubric, bypassing classification.
    ///
    /// Used to post synthesized entries (e.g. the period result).
    pub fn post(&mut self, rubric: R, entry: Entry) {
        self.total += entry.amount;
        self.sections.entry(rubric).or_default().push(entry);
    }
}

/// Serialized form of one rubric: its statutory title next to its lines.
#[derive(Serialize)]
struct TitledSection<'a> {
    intitule: &'static str,
    lignes: &'a [Entry],
    total: Decimal,
}

impl<R: Rubric> Serialize for Rubrics<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (rubric, section) in &self.sections {
            let titled = TitledSection {
                intitule: rubric.title(),
                lignes: &section.lines,
                total: section.total,
            };
            map.serialize_entry(rubric, &titled)?;
        }
        map.end()
    }
}

/// Upper bound on the sum of absolute amounts of one snapshot.
///
/// Statement figures are signed sums over disjoint subsets of the entries,
/// plus at most one carried result, so they stay below twice this bound.
pub const MAX_VOLUME: Decimal = Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX >> 2, false, 0);

/// Sum of absolute amounts, or `None` when it exceeds [`MAX_VOLUME`].
#[must_use]
pub fn volume(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(amount.abs()))
        .filter(|sum| *sum <= MAX_VOLUME)
}

/// Partitions entries into the rubrics of `R` and sums each rubric.
///
/// Entries matching no rubric are left out. Line order follows input order.
/// Amounts must be bounded by [`volume`]; unbounded totals overflow.
#[must_use]
pub fn aggregate<R: Rubric>(entries: &[Entry]) -> Rubrics<R> {
    let mut rubrics = Rubrics::default();
    for entry in entries {
        if let Some(rubric) = R::of(&entry.account) {
            rubrics.post(rubric, entry.clone());
        }
    }
    rubrics
}

/// Returns true if any rubric of `R` classifies the code.
#[must_use]
pub fn is_covered<R: Rubric>(code: &AccountCode) -> bool {
    R::of(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::Serialize;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
    #[serde(rename_all = "camelCase")]
    enum Sample {
        Stocks,
        Cash,
    }

    impl Rubric for Sample {
        const ALL: &'static [Self] = &[Self::Stocks, Self::Cash];

        fn classes(self) -> ClassSet {
            match self {
                Self::Stocks => const { ClassSet::two_digit(&[30..=35]) },
                Self::Cash => const { ClassSet::two_digit(&[50..=52]) },
            }
        }

        fn title(self) -> &'static str {
            match self {
                Self::Stocks => "Stocks",
                Self::Cash => "Trésorerie",
            }
        }
    }

    #[test]
    fn test_aggregate_partitions_and_sums() {
        let entries = vec![
            Entry::new("311", dec!(100)),
            Entry::new("521", dec!(40)),
            Entry::new("331", dec!(60)),
            Entry::new("411", dec!(999)),
        ];

        let rubrics = aggregate::<Sample>(&entries);

        assert_eq!(rubrics.total_of(Sample::Stocks), dec!(160));
        assert_eq!(rubrics.total_of(Sample::Cash), dec!(40));
        assert_eq!(rubrics.total(), dec!(200));
        let stock_accounts: Vec<_> = rubrics
            .get(Sample::Stocks)
            .lines
            .iter()
            .map(|e| e.account.as_str())
            .collect();
        assert_eq!(stock_accounts, vec!["311", "331"]);
    }

    #[test]
    fn test_empty_rubrics_are_present() {
        let rubrics = aggregate::<Sample>(&[]);
        assert_eq!(rubrics.iter().count(), 2);
        assert!(rubrics.get(Sample::Cash).is_empty());
        assert_eq!(rubrics.total(), Decimal::ZERO);
    }

    #[test]
    fn test_serializes_as_named_map() {
        let rubrics = aggregate::<Sample>(&[Entry::new("521", dec!(5))]);
        let json = serde_json::to_value(&rubrics).unwrap();
        assert_eq!(json["cash"]["lignes"][0]["account"], "521");
        assert_eq!(json["cash"]["total"], "5");
        assert_eq!(json["cash"]["intitule"], "Trésorerie");
        assert_eq!(json["stocks"]["lignes"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_volume_is_bounded() {
        assert_eq!(volume([dec!(10), dec!(-4)]), Some(dec!(14)));
        assert_eq!(volume([MAX_VOLUME]), Some(MAX_VOLUME));
        assert_eq!(volume([MAX_VOLUME, dec!(-1)]), None);
        let half = Decimal::MAX / dec!(2) + Decimal::ONE;
        assert_eq!(volume([half, half]), None);
    }

    #[test]
    fn test_post_bypasses_classification() {
        let mut rubrics = aggregate::<Sample>(&[]);
        rubrics.post(Sample::Cash, Entry::new("999", dec!(7)));
        assert_eq!(rubrics.total_of(Sample::Cash), dec!(7));
        assert_eq!(rubrics.total(), dec!(7));
    }
}
