//! Acknowledgment records and the range compression that packs them.

use std::fmt;
use std::ops::RangeInclusive;

/// One sequence number, or one inclusive contiguous range of them.
///
/// A record is *ranged* when `end_index > index`. Any other record, including
/// a malformed one received from a peer with `end_index < index`, denotes the
/// single number `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    index: u32,
    end_index: u32,
}

impl Record {
    /// Creates a record for one sequence number.
    #[must_use]
    pub const fn single(index: u32) -> Self {
        Self {
            index,
            end_index: index,
        }
    }

    /// Creates a record for `index..=end_index`.
    ///
    /// Degenerates to [`Record::single`] when `end_index <= index`.
    #[must_use]
    pub const fn ranged(index: u32, end_index: u32) -> Self {
        if end_index > index {
            Self { index, end_index }
        } else {
            Self::single(index)
        }
    }

    /// Builds a record exactly as a peer sent it, without normalising.
    pub(crate) const fn from_wire(index: u32, end_index: u32) -> Self {
        Self { index, end_index }
    }

    /// First sequence number.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Last sequence number as carried; only meaningful when ranged.
    #[must_use]
    pub const fn end_index(self) -> u32 {
        self.end_index
    }

    /// Returns `true` when the record denotes more than one number.
    #[must_use]
    pub const fn is_ranged(self) -> bool {
        self.end_index > self.index
    }

    /// The ascending sequence numbers this record denotes.
    #[must_use]
    pub const fn numbers(self) -> RangeInclusive<u32> {
        if self.is_ranged() {
            self.index..=self.end_index
        } else {
            self.index..=self.index
        }
    }

    /// How many sequence numbers this record denotes.
    #[must_use]
    pub const fn number_count(self) -> usize {
        if self.is_ranged() {
            (self.end_index - self.index) as usize + 1
        } else {
            1
        }
    }
}

impl From<u32> for Record {
    fn from(index: u32) -> Self {
        Self::single(index)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ranged() {
            write!(f, "{}..={}", self.index, self.end_index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// Compresses records into the minimal ascending list of maximal runs.
///
/// The result is what flattening every record, sorting the numbers and
/// emitting one record per run of consecutive values would give, except that
/// duplicate numbers are dropped first: output records never overlap. Spans
/// are merged directly so wide ranges are never materialised.
#[must_use]
pub fn condense(records: &[Record]) -> Vec<Record> {
    let mut spans: Vec<(u32, u32)> = records
        .iter()
        .map(|record| {
            let numbers = record.numbers();
            (*numbers.start(), *numbers.end())
        })
        .collect();
    spans.sort_unstable();

    let mut condensed = Vec::with_capacity(spans.len());
    let mut spans = spans.into_iter();
    let Some((mut start, mut end)) = spans.next() else {
        return condensed;
    };
    for (next_start, next_end) in spans {
        // Overlapping or adjacent spans belong to the same run.
        if next_start <= end.saturating_add(1) {
            end = end.max(next_end);
        } else {
            condensed.push(Record::ranged(start, end));
            start = next_start;
            end = next_end;
        }
    }
    condensed.push(Record::ranged(start, end));
    condensed
}

/// Expands records into one single record per sequence number.
///
/// Order and multiplicity mirror the input exactly: nothing is sorted or
/// deduplicated.
#[must_use]
pub fn expand(records: &[Record]) -> Vec<Record> {
    let mut expanded = Vec::with_capacity(number_count(records));
    expanded.extend(
        records
            .iter()
            .flat_map(|record| record.numbers())
            .map(Record::single),
    );
    expanded
}

/// Total sequence numbers the records denote, counting duplicates.
#[must_use]
pub fn number_count(records: &[Record]) -> usize {
    records
        .iter()
        .fold(0usize, |total, record| total.saturating_add(record.number_count()))
}
