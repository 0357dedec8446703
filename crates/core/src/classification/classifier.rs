//! Account-class extraction and class-set membership.

use std::ops::RangeInclusive;

use crate::ledger::AccountCode;

/// Extracts the class prefix made of the first `digits` characters of a code.
///
/// Codes shorter than `digits` are parsed whole. Returns `None` when the
/// prefix is not a plain unsigned number; such entries match no rubric.
#[must_use]
pub fn class_prefix(code: &AccountCode, digits: usize) -> Option<u16> {
    let code = code.as_str().trim();
    let prefix = code.get(..digits).unwrap_or(code);
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Returns true if the code's class prefix belongs to `classes`.
#[must_use]
pub fn belongs_to_classes(code: &AccountCode, classes: &ClassSet) -> bool {
    classes.contains(code)
}

/// A static set of account classes read at a fixed prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSet {
    digits: usize,
    ranges: &'static [RangeInclusive<u16>],
}

impl ClassSet {
    /// Classes identified by their first digit (cash-basis statement).
    #[must_use]
    pub const fn one_digit(ranges: &'static [RangeInclusive<u16>]) -> Self {
        Self { digits: 1, ranges }
    }

    /// Classes identified by their first two digits.
    #[must_use]
    pub const fn two_digit(ranges: &'static [RangeInclusive<u16>]) -> Self {
        Self { digits: 2, ranges }
    }

    /// Sub-classes identified by their first three digits.
    #[must_use]
    pub const fn three_digit(ranges: &'static [RangeInclusive<u16>]) -> Self {
        Self { digits: 3, ranges }
    }

    /// Returns true if the prefix itself is one of the classes.
    #[must_use]
    pub fn contains_class(&self, class: u16) -> bool {
        self.ranges.iter().any(|range| range.contains(&class))
    }

    /// Returns true if the code's prefix is one of the classes.
    #[must_use]
    pub fn contains(&self, code: &AccountCode) -> bool {
        class_prefix(code, self.digits).is_some_and(|class| self.contains_class(class))
    }
}
