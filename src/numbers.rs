//! The owned list type query results are returned in.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered, immutable sequence of phone numbers.
///
/// Produced by the query operations on
/// [`PhoneForward`](crate::PhoneForward); consumers read it by index or by
/// iteration and cannot mutate it. Lookup queries on malformed input yield
/// the empty list, so `get(0)` doubles as the "was there a result" check.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PhoneNumbers {
    numbers: Vec<String>,
}

impl PhoneNumbers {
    /// List holding exactly one number.
    pub(crate) fn singleton(number: String) -> Self {
        PhoneNumbers {
            numbers: vec![number],
        }
    }

    /// Returns the `idx`-th number, or `None` past the end.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.numbers.get(idx).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Returns `true` when the list holds no numbers.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Iterates the numbers in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.numbers.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for PhoneNumbers {
    fn from(numbers: Vec<String>) -> Self {
        PhoneNumbers { numbers }
    }
}

impl IntoIterator for PhoneNumbers {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.numbers.into_iter()
    }
}

impl<'a> IntoIterator for &'a PhoneNumbers {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.numbers.iter()
    }
}

impl fmt::Display for PhoneNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, number) in self.numbers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(number)?;
        }
        Ok(())
    }
}
