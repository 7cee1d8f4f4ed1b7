use std::fmt::Display;
use std::str::FromStr;

use rill_core::error::{InputError, Result};
use rill_core::sequence::Sequence;
use rill_core::step::Step;

type Transform<T, U> = dyn Fn(T) -> Result<U> + Send + Sync;

/// A step that replaces every element with the result of a function.
///
/// Order and cardinality are preserved.
pub struct Map<T, U> {
    name: String,
    transform: Box<Transform<T, U>>,
}

impl<T: 'static, U: 'static> Map<T, U> {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Self::fallible(move |value| Ok(transform(value)))
    }

    /// Create a map whose transform may fail. A failure aborts the
    /// evaluation and is tagged with this step's name.
    pub fn fallible<F>(transform: F) -> Self
    where
        F: Fn(T) -> Result<U> + Send + Sync + 'static,
    {
        Self {
            name: "map".into(),
            transform: Box::new(transform),
        }
    }

    /// Parse every element with [`FromStr`].
    ///
    /// An element that does not parse is reported as
    /// [`InputError::Malformed`].
    pub fn parse() -> Self
    where
        T: AsRef<str>,
        U: FromStr,
        U::Err: Display,
    {
        Self::fallible(|value: T| {
            let text = value.as_ref();
            text.parse::<U>()
                .map_err(|err| InputError::Malformed(format!("{text:?}: {err}")).into())
        })
        .with_name("parse")
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<T: 'static, U: 'static> Step for Map<T, U> {
    type Input = T;
    type Output = U;

    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&'a self, input: Sequence<'a, T>) -> Sequence<'a, U> {
        input.try_map(move |value| (self.transform)(value).map_err(|err| err.in_step(&self.name)))
    }
}
