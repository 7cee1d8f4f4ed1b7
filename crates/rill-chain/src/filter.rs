use rill_core::error::Result;
use rill_core::sequence::Sequence;
use rill_core::step::Step;

type Predicate<T> = dyn Fn(&T) -> Result<bool> + Send + Sync;

/// A step that keeps the elements matching a predicate, in input order.
pub struct Filter<T> {
    name: String,
    predicate: Box<Predicate<T>>,
}

impl<T: 'static> Filter<T> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::fallible(move |value| Ok(predicate(value)))
    }

    /// Create a filter whose predicate may fail. A failure aborts the
    /// evaluation and is tagged with this step's name.
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> Result<bool> + Send + Sync + 'static,
    {
        Self {
            name: "filter".into(),
            predicate: Box::new(predicate),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<T: 'static> Step for Filter<T> {
    type Input = T;
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&'a self, input: Sequence<'a, T>) -> Sequence<'a, T> {
        input.try_filter(move |value| {
            (self.predicate)(value).map_err(|err| err.in_step(&self.name))
        })
    }
}
