use std::cmp::Ordering;

use rill_core::error::Result;
use rill_core::sequence::Sequence;
use rill_core::step::Step;

type Comparator<T> = dyn Fn(&T, &T) -> Result<Ordering> + Send + Sync;

/// A step that stably sorts its whole input.
///
/// Elements that compare equal keep their original relative order.
pub struct Sorted<T> {
    name: String,
    compare: Box<Comparator<T>>,
}

impl<T: 'static> Sorted<T> {
    /// Sort by the natural order of `T`.
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self::by(Ord::cmp)
    }

    pub fn by<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::fallible(move |a, b| Ok(compare(a, b)))
    }

    pub fn by_key<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::by(move |a, b| key(a).cmp(&key(b)))
    }

    /// Sort with a comparator that may fail. A failure aborts the
    /// evaluation and is tagged with this step's name.
    pub fn fallible<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Result<Ordering> + Send + Sync + 'static,
    {
        Self {
            name: "sorted".into(),
            compare: Box::new(compare),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<T: 'static> Step for Sorted<T> {
    type Input = T;
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&'a self, input: Sequence<'a, T>) -> Sequence<'a, T> {
        input.try_sort_by(move |a, b| (self.compare)(a, b).map_err(|err| err.in_step(&self.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_core::error::StepError;

    #[test]
    fn natural_order() {
        let sorted = Sorted::natural();
        let result = sorted.apply(Sequence::new([5, 2, 8, 1, 3])).into_vec().unwrap();
        assert_eq!(result, vec![1, 2, 3, 5, 8]);
    }

    #[test]
    fn by_length_is_stable() {
        let sorted = Sorted::by_key(|s: &&str| s.len());
        let result = sorted
            .apply(Sequence::new(["Java", "es", "funcional"]))
            .into_vec()
            .unwrap();
        assert_eq!(result, vec!["es", "Java", "funcional"]);

        let ties = sorted
            .apply(Sequence::new(["tres", "uno", "dos", "seis"]))
            .into_vec()
            .unwrap();
        assert_eq!(ties, vec!["uno", "dos", "tres", "seis"]);
    }

    #[test]
    fn custom_comparator() {
        let descending = Sorted::by(|a: &i32, b: &i32| b.cmp(a));
        let result = descending.apply(Sequence::new([1, 3, 2])).into_vec().unwrap();
        assert_eq!(result, vec![3, 2, 1]);
    }

    #[test]
    fn fallible_comparator_aborts() {
        let partial = Sorted::fallible(|a: &f64, b: &f64| {
            a.partial_cmp(b)
                .ok_or_else(|| StepError::Comparator(format!("cannot order {a} and {b}")).into())
        })
        .with_name("by_value");

        let ok = partial.apply(Sequence::new([2.5, 0.5, 1.0])).into_vec().unwrap();
        assert_eq!(ok, vec![0.5, 1.0, 2.5]);

        let err = partial
            .apply(Sequence::new([2.5, f64::NAN, 1.0]))
            .into_vec()
            .unwrap_err();
        assert_eq!(err.step_name(), Some("by_value"));
    }
}
