//! In-place O(n²) sorts driven by a three-way comparator.
//!
//! The algorithms are generic over the element type and only ever see a
//! mutable slice; the dispatcher decides which container's backing sequence
//! gets handed over. Every algorithm keeps equal keys in their original
//! relative order.

use std::{cmp::Ordering, fmt, str::FromStr};

use icu_collator::{Collator, CollatorBorrowed};
use serde::{Deserialize, Serialize};
use ticket_desk_proto::Ticket;

use crate::errors::DispatchError;

/// Ticket attribute to order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriteria {
    /// Ascending numeric id.
    Id,
    /// Ascending name in collation order.
    Name,
    /// Descending priority, most urgent first.
    Priority,
}

impl SortCriteria {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriteria::Id => "id",
            SortCriteria::Name => "name",
            SortCriteria::Priority => "priority",
        }
    }
}

impl fmt::Display for SortCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriteria {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortCriteria::Id),
            "name" => Ok(SortCriteria::Name),
            "priority" => Ok(SortCriteria::Priority),
            _ => Err(DispatchError::UnknownLabel {
                kind: "sort criteria",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Selection,
}

impl SortAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Selection => "selection",
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortAlgorithm {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bubble" => Ok(SortAlgorithm::Bubble),
            "insertion" => Ok(SortAlgorithm::Insertion),
            "selection" => Ok(SortAlgorithm::Selection),
            _ => Err(DispatchError::UnknownLabel {
                kind: "sort algorithm",
                value: s.to_string(),
            }),
        }
    }
}

/// Three-way ticket comparison for one criteria.
///
/// Names go through a root-locale collator, so case and accents are
/// secondary to the base letters: `Adam < alpha < Alpha < Émile < Zoe`.
pub struct TicketOrder {
    criteria: SortCriteria,
    collator: CollatorBorrowed<'static>,
}

impl TicketOrder {
    pub fn new(criteria: SortCriteria) -> Result<Self, DispatchError> {
        let collator = Collator::try_new(Default::default(), Default::default())
            .map_err(|e| DispatchError::Collation(e.to_string()))?;
        Ok(Self { criteria, collator })
    }

    pub fn compare(&self, a: &Ticket, b: &Ticket) -> Ordering {
        match self.criteria {
            SortCriteria::Id => a.id().cmp(&b.id()),
            SortCriteria::Name => self.collator.compare(a.name(), b.name()),
            SortCriteria::Priority => b.priority().cmp(&a.priority()),
        }
    }
}

/// Sort tickets in place with the chosen algorithm and criteria.
pub fn sort_tickets(
    items: &mut [Ticket],
    criteria: SortCriteria,
    algorithm: SortAlgorithm,
) -> Result<(), DispatchError> {
    let order = TicketOrder::new(criteria)?;
    let cmp = |a: &Ticket, b: &Ticket| order.compare(a, b);
    match algorithm {
        SortAlgorithm::Bubble => bubble_sort(items, cmp),
        SortAlgorithm::Insertion => insertion_sort(items, cmp),
        SortAlgorithm::Selection => selection_sort(items, cmp),
    }
    Ok(())
}

/// Adjacent-swap passes until a pass makes no swap.
pub fn bubble_sort<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    loop {
        let mut swapped = false;
        for i in 0..items.len() - 1 {
            if cmp(&items[i], &items[i + 1]) == Ordering::Greater {
                items.swap(i, i + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Take each element as the key, find the slot after the last predecessor not
/// greater than it, then shift the greater run one place right and drop the
/// key into the gap.
pub fn insertion_sort<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut slot = i;
        while slot > 0 && cmp(&items[slot - 1], &items[i]) == Ordering::Greater {
            slot -= 1;
        }
        // items[slot..i] shifts right by one, the key lands at `slot`
        items[slot..=i].rotate_right(1);
    }
}

/// Select the minimum of the unsorted suffix and move it to the suffix start.
pub fn selection_sort<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 0..items.len() {
        let mut min = i;
        for j in i + 1..items.len() {
            if cmp(&items[j], &items[min]) == Ordering::Less {
                min = j;
            }
        }
        // rotate rather than swap so the displaced element keeps its place among equals
        if min != i {
            items[i..=min].rotate_right(1);
        }
    }
}
