use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::iter;

use crate::error::{Result, RillError};

/// Boxed iterator backing a [`Sequence`]. Failures travel in-band.
pub type Items<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// An ordered, lazily-produced run of elements.
///
/// Every transformation consumes the sequence and returns a new one; nothing
/// is evaluated until a terminal action (or the iterator) pulls elements.
/// `filter`, `map`, `distinct`, and `flat_map` work element by element, while
/// the `sort*` family drains its whole input on the first pull.
///
/// The first failure raised by a predicate, transform, comparator, or
/// expander aborts evaluation: terminal actions return that error and no
/// elements.
pub struct Sequence<'a, T> {
    items: Items<'a, T>,
}

impl<'a, T: 'a> Sequence<'a, T> {
    /// Create a sequence over the given elements.
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self {
            items: Box::new(elements.into_iter().map(Ok)),
        }
    }

    /// Create a sequence from already-evaluated results.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<T>>,
        I::IntoIter: 'a,
    {
        Self {
            items: Box::new(results.into_iter()),
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Box::new(iter::empty()),
        }
    }

    /// A sequence whose evaluation fails with `err`.
    pub fn failed(err: RillError) -> Self {
        Self {
            items: Box::new(iter::once(Err(err))),
        }
    }

    /// Keep the elements for which `predicate` holds.
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'a,
    {
        self.try_filter(move |value| Ok(predicate(value)))
    }

    pub fn try_filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&T) -> Result<bool> + 'a,
    {
        let items = self.items.filter_map(move |item| match item {
            Ok(value) => match predicate(&value) {
                Ok(true) => Some(Ok(value)),
                Ok(false) => None,
                Err(err) => Some(Err(err)),
            },
            Err(err) => Some(Err(err)),
        });
        Self {
            items: Box::new(items),
        }
    }

    /// Replace every element with `transform(element)`.
    pub fn map<U, F>(self, transform: F) -> Sequence<'a, U>
    where
        U: 'a,
        F: Fn(T) -> U + 'a,
    {
        Sequence {
            items: Box::new(self.items.map(move |item| item.map(&transform))),
        }
    }

    pub fn try_map<U, F>(self, transform: F) -> Sequence<'a, U>
    where
        U: 'a,
        F: Fn(T) -> Result<U> + 'a,
    {
        Sequence {
            items: Box::new(self.items.map(move |item| item.and_then(&transform))),
        }
    }

    /// Drop later duplicates, keeping the first occurrence of each value.
    pub fn distinct(self) -> Self
    where
        T: Eq + Hash + Clone,
    {
        self.distinct_by_key(T::clone)
    }

    /// Drop elements whose key has already been seen.
    pub fn distinct_by_key<K, F>(self, key: F) -> Self
    where
        K: Eq + Hash + 'a,
        F: Fn(&T) -> K + 'a,
    {
        let mut seen = HashSet::new();
        let items = self.items.filter(move |item| match item {
            Ok(value) => seen.insert(key(value)),
            Err(_) => true,
        });
        Self {
            items: Box::new(items),
        }
    }

    /// Stable sort by the natural order of `T`.
    pub fn sorted(self) -> Self
    where
        T: Ord,
    {
        self.sort_by(Ord::cmp)
    }

    pub fn sort_by<F>(self, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'a,
    {
        self.reorder(move |mut values| {
            values.sort_by(|a, b| compare(a, b));
            Ok(values)
        })
    }

    pub fn sort_by_key<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        self.sort_by(move |a, b| key(a).cmp(&key(b)))
    }

    /// Stable sort with a comparator that may fail.
    ///
    /// The first failing comparison ends the sort; no further comparisons
    /// are made and the sequence yields that failure.
    pub fn try_sort_by<F>(self, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Result<Ordering> + 'a,
    {
        self.reorder(move |values| merge_sort(values, &compare))
    }

    /// Drain the whole input on the first pull and pass it to `reorder`.
    fn reorder<F>(self, reorder: F) -> Self
    where
        F: FnOnce(Vec<T>) -> Result<Vec<T>> + 'a,
    {
        let items = self.items;
        let reordered = iter::once_with(move || -> Result<Vec<T>> {
            let values = items.collect::<Result<Vec<T>>>()?;
            tracing::trace!(elements = values.len(), "reordering sequence");
            reorder(values)
        })
        .flat_map(spill);

        Self {
            items: Box::new(reordered),
        }
    }

    /// Replace every element with the elements of `expand(element)`.
    pub fn flat_map<U, I, F>(self, expand: F) -> Sequence<'a, U>
    where
        U: 'a,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'a,
        F: Fn(T) -> I + 'a,
    {
        self.try_flat_map(move |value| Ok(Sequence::new(expand(value))))
    }

    /// Like [`flat_map`](Self::flat_map), but the expander returns a
    /// sub-sequence that may itself fail.
    pub fn try_flat_map<U, F>(self, expand: F) -> Sequence<'a, U>
    where
        U: 'a,
        F: Fn(T) -> Result<Sequence<'a, U>> + 'a,
    {
        let items = self.items.flat_map(move |item| -> Items<'a, U> {
            match item.and_then(&expand) {
                Ok(sub) => sub.items,
                Err(err) => Box::new(iter::once(Err(err))),
            }
        });
        Sequence {
            items: Box::new(items),
        }
    }

    /// Evaluate the whole sequence.
    pub fn into_vec(self) -> Result<Vec<T>> {
        self.items.collect()
    }

    /// Run `action` once per element, in order.
    ///
    /// The sequence is fully evaluated first, so `action` never sees any
    /// element of a failing evaluation. Returns the number of elements.
    pub fn for_each<F>(self, mut action: F) -> Result<usize>
    where
        F: FnMut(T),
    {
        self.try_for_each(|value| {
            action(value);
            Ok(())
        })
    }

    /// Like [`for_each`](Self::for_each), stopping at the first failing action.
    pub fn try_for_each<F>(self, mut action: F) -> Result<usize>
    where
        F: FnMut(T) -> Result<()>,
    {
        let values = self.into_vec()?;
        let count = values.len();
        for value in values {
            action(value)?;
        }
        Ok(count)
    }
}

// Top-down stable merge sort that stops at the first failing comparison.
fn merge_sort<T, F>(mut values: Vec<T>, compare: &F) -> Result<Vec<T>>
where
    F: Fn(&T, &T) -> Result<Ordering>,
{
    if values.len() <= 1 {
        return Ok(values);
    }
    let right = values.split_off(values.len() / 2);
    let left = merge_sort(values, compare)?;
    let right = merge_sort(right, compare)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        if compare(l, r)? == Ordering::Greater {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}

fn spill<'a, T: 'a>(batch: Result<Vec<T>>) -> Items<'a, T> {
    match batch {
        Ok(values) => Box::new(values.into_iter().map(Ok)),
        Err(err) => Box::new(iter::once(Err(err))),
    }
}

impl<'a, T: 'a> IntoIterator for Sequence<'a, T> {
    type Item = Result<T>;
    type IntoIter = Items<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items
    }
}

impl<'a, T: 'a> FromIterator<T> for Sequence<'a, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> fmt::Debug for Sequence<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence").finish_non_exhaustive()
    }
}
