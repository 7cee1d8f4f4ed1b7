use std::hash::Hash;

use rill_core::sequence::Sequence;
use rill_core::step::Step;

type KeyFn<T, K> = dyn Fn(&T) -> K + Send + Sync;

/// A step that drops later duplicates, keeping first occurrences in order.
///
/// Duplicates are detected by hashing the key of each element; by default
/// the key is the element itself.
pub struct Distinct<T, K = T> {
    name: String,
    key: Box<KeyFn<T, K>>,
}

impl<T: Clone + 'static> Distinct<T> {
    pub fn new() -> Self {
        Self::by_key(T::clone)
    }
}

impl<T: Clone + 'static> Default for Distinct<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static, K: 'static> Distinct<T, K> {
    /// Treat two elements as duplicates when their keys are equal.
    pub fn by_key<F>(key: F) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            name: "distinct".into(),
            key: Box::new(key),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<T, K> Step for Distinct<T, K>
where
    T: 'static,
    K: Eq + Hash + 'static,
{
    type Input = T;
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&'a self, input: Sequence<'a, T>) -> Sequence<'a, T> {
        input.distinct_by_key(move |value| (self.key)(value))
    }
}
