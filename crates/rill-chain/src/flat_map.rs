use rill_core::error::Result;
use rill_core::sequence::Sequence;
use rill_core::step::Step;

type Expand<T, U> = dyn Fn(T) -> Result<Sequence<'static, U>> + Send + Sync;

/// A step that replaces every element with zero or more elements.
///
/// Sub-sequences are concatenated in input order.
pub struct FlatMap<T, U> {
    name: String,
    expand: Box<Expand<T, U>>,
}

impl<T: 'static, U: 'static> FlatMap<T, U> {
    pub fn new<I, F>(expand: F) -> Self
    where
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        Self::fallible(move |value| Ok(Sequence::new(expand(value))))
    }

    /// Create a flat-map whose expander may fail, or return a sub-sequence
    /// that fails part way. Expander failures are tagged with this step's
    /// name.
    pub fn fallible<F>(expand: F) -> Self
    where
        F: Fn(T) -> Result<Sequence<'static, U>> + Send + Sync + 'static,
    {
        Self {
            name: "flat_map".into(),
            expand: Box::new(expand),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<T: 'static, U: 'static> Step for FlatMap<T, U> {
    type Input = T;
    type Output = U;

    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&'a self, input: Sequence<'a, T>) -> Sequence<'a, U> {
        input.try_flat_map(move |value| {
            let sub: Sequence<'a, U> = (self.expand)(value).map_err(|err| err.in_step(&self.name))?;
            Ok(sub)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_core::error::{RillError, StepError};

    #[test]
    fn split_and_flatten() {
        let words = FlatMap::new(|s: &'static str| s.split(' ').collect::<Vec<_>>());
        let result = words
            .apply(Sequence::new(["a b", "c d"]))
            .into_vec()
            .unwrap();
        assert_eq!(result, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_expansion_contributes_nothing() {
        let repeat = FlatMap::new(|n: usize| vec![n; n]);
        let result = repeat.apply(Sequence::new([1, 0, 3])).into_vec().unwrap();
        assert_eq!(result, vec![1, 3, 3, 3]);
    }

    #[test]
    fn expander_failure_is_tagged() {
        let checked = FlatMap::fallible(|n: i32| {
            if n < 0 {
                Err(StepError::Expand(format!("negative count {n}")).into())
            } else {
                Ok(Sequence::new(0..n))
            }
        })
        .with_name("ranges");

        let ok = checked.apply(Sequence::new([2, 1])).into_vec().unwrap();
        assert_eq!(ok, vec![0, 1, 0]);

        let err = checked.apply(Sequence::new([2, -1])).into_vec().unwrap_err();
        assert_eq!(err.step_name(), Some("ranges"));
    }

    #[test]
    fn failing_subsequence_propagates() {
        let broken = FlatMap::fallible(|n: i32| {
            Ok(Sequence::from_results(vec![
                Ok(n),
                Err(RillError::Other("truncated".into())),
            ]))
        });
        let result = broken.apply(Sequence::new([7])).into_vec();
        assert!(result.is_err());
    }
}
