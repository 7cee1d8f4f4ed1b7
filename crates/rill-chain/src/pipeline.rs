use std::cmp::Ordering;
use std::hash::Hash;

use rill_core::config::RunConfig;
use rill_core::error::Result;
use rill_core::sequence::Sequence;
use rill_core::step::{Identity, Step, StepExt, StepSequence};

use crate::distinct::Distinct;
use crate::filter::Filter;
use crate::flat_map::FlatMap;
use crate::map::Map;
use crate::sort::Sorted;

/// An ordered chain of steps plus the labels used when it runs.
///
/// Steps are appended left to right with the builder methods and applied in
/// that order. A pipeline is evaluated through `&self`, so the same pipeline
/// can be run against any number of inputs.
///
/// ```
/// use rill_chain::pipeline::Pipeline;
///
/// let words = Pipeline::new()
///     .flat_map(|s: &'static str| s.split(' ').collect::<Vec<_>>())
///     .map(str::to_lowercase)
///     .distinct()
///     .sorted();
///
/// assert_eq!(words.run(["B a", "c A"]).unwrap(), vec!["a", "b", "c"]);
/// ```
pub struct Pipeline<S> {
    steps: S,
    config: RunConfig,
}

/// A pipeline extended with one more step.
pub type Then<S, N> = Pipeline<StepSequence<S, N>>;

impl<T: 'static> Pipeline<Identity<T>> {
    /// Start an empty pipeline over elements of type `T`.
    pub fn new() -> Self {
        Self::from_step(Identity::new())
    }
}

impl<T: 'static> Default for Pipeline<Identity<T>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Step> Pipeline<S> {
    pub fn from_step(step: S) -> Self {
        Self {
            steps: step,
            config: RunConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Append any step whose input matches this pipeline's output.
    pub fn then<N>(self, next: N) -> Then<S, N>
    where
        N: Step<Input = S::Output>,
    {
        Pipeline {
            steps: self.steps.pipe(next),
            config: self.config,
        }
    }

    pub fn filter<F>(self, predicate: F) -> Then<S, Filter<S::Output>>
    where
        F: Fn(&S::Output) -> bool + Send + Sync + 'static,
    {
        self.then(Filter::new(predicate))
    }

    pub fn try_filter<F>(self, predicate: F) -> Then<S, Filter<S::Output>>
    where
        F: Fn(&S::Output) -> Result<bool> + Send + Sync + 'static,
    {
        self.then(Filter::fallible(predicate))
    }

    pub fn map<U, F>(self, transform: F) -> Then<S, Map<S::Output, U>>
    where
        U: 'static,
        F: Fn(S::Output) -> U + Send + Sync + 'static,
    {
        self.then(Map::new(transform))
    }

    pub fn try_map<U, F>(self, transform: F) -> Then<S, Map<S::Output, U>>
    where
        U: 'static,
        F: Fn(S::Output) -> Result<U> + Send + Sync + 'static,
    {
        self.then(Map::fallible(transform))
    }

    pub fn distinct(self) -> Then<S, Distinct<S::Output>>
    where
        S::Output: Eq + Hash + Clone,
    {
        self.then(Distinct::new())
    }

    pub fn sorted(self) -> Then<S, Sorted<S::Output>>
    where
        S::Output: Ord,
    {
        self.then(Sorted::natural())
    }

    pub fn sorted_by<F>(self, compare: F) -> Then<S, Sorted<S::Output>>
    where
        F: Fn(&S::Output, &S::Output) -> Ordering + Send + Sync + 'static,
    {
        self.then(Sorted::by(compare))
    }

    pub fn sorted_by_key<K, F>(self, key: F) -> Then<S, Sorted<S::Output>>
    where
        K: Ord,
        F: Fn(&S::Output) -> K + Send + Sync + 'static,
    {
        self.then(Sorted::by_key(key))
    }

    pub fn flat_map<U, I, F>(self, expand: F) -> Then<S, FlatMap<S::Output, U>>
    where
        U: 'static,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
        F: Fn(S::Output) -> I + Send + Sync + 'static,
    {
        self.then(FlatMap::new(expand))
    }

    /// The step chain as `"filter -> map"`, or `"identity"` when empty.
    pub fn describe(&self) -> String {
        let names = self.steps.describe();
        if names.is_empty() {
            "identity".to_string()
        } else {
            names.join(" -> ")
        }
    }

    /// Attach the chain to `input` without evaluating anything yet.
    pub fn evaluate<'a, I>(&'a self, input: I) -> Sequence<'a, S::Output>
    where
        I: IntoIterator<Item = S::Input>,
        I::IntoIter: 'a,
    {
        self.steps.apply(Sequence::new(input))
    }

    /// Evaluate the chain over `input` and collect the result.
    ///
    /// Returns the first failure raised by any step and no elements.
    pub fn run<'a, I>(&'a self, input: I) -> Result<Vec<S::Output>>
    where
        I: IntoIterator<Item = S::Input>,
        I::IntoIter: 'a,
    {
        let span = tracing::debug_span!(
            "pipeline",
            pipeline = %self.config.name,
            run_id = %self.config.run_id,
            tags = ?self.config.tags,
            metadata = ?self.config.metadata
        );
        let _enter = span.enter();
        tracing::debug!(steps = %self.describe(), "evaluating pipeline");

        match self.evaluate(input).into_vec() {
            Ok(values) => {
                tracing::debug!(elements = values.len(), "pipeline complete");
                Ok(values)
            }
            Err(e) => {
                tracing::warn!(error = %e, "pipeline failed");
                Err(e)
            }
        }
    }

    /// Terminal action: evaluate the chain, then call `action` once per
    /// element in order. `action` is never called if evaluation fails.
    pub fn for_each<'a, I, F>(&'a self, input: I, mut action: F) -> Result<usize>
    where
        I: IntoIterator<Item = S::Input>,
        I::IntoIter: 'a,
        F: FnMut(S::Output),
    {
        self.try_for_each(input, |value| {
            action(value);
            Ok(())
        })
    }

    /// Like [`for_each`](Self::for_each), stopping at the first failing action.
    pub fn try_for_each<'a, I, F>(&'a self, input: I, mut action: F) -> Result<usize>
    where
        I: IntoIterator<Item = S::Input>,
        I::IntoIter: 'a,
        F: FnMut(S::Output) -> Result<()>,
    {
        let values = self.run(input)?;
        let count = values.len();
        for value in values {
            action(value)?;
        }
        Ok(count)
    }
}
