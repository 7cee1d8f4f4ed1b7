use std::marker::PhantomData;

use crate::sequence::Sequence;

/// A single stage of a pipeline: turns one sequence into another.
///
/// Steps are pure: applying the same step to the same input always yields
/// the same output, and a step can be applied any number of times through
/// `&self`. Steps are composed with `.pipe()`.
pub trait Step {
    type Input: 'static;
    type Output: 'static;

    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Attach this step to `input`. Evaluation stays lazy.
    fn apply<'a>(&'a self, input: Sequence<'a, Self::Input>) -> Sequence<'a, Self::Output>;

    /// Names of the primitive steps this step is made of, in order.
    fn describe(&self) -> Vec<String> {
        vec![self.name().to_string()]
    }
}

/// Extension trait providing `.pipe()` for composing steps.
pub trait StepExt: Step + Sized {
    /// Compose this step with another, creating a sequence where
    /// the output of `self` feeds into the input of `next`.
    fn pipe<S>(self, next: S) -> StepSequence<Self, S>
    where
        S: Step<Input = Self::Output>,
    {
        StepSequence {
            first: self,
            second: next,
        }
    }
}

impl<T: Step + Sized> StepExt for T {}

/// A step composed of two sequential steps.
pub struct StepSequence<A, B> {
    pub(crate) first: A,
    pub(crate) second: B,
}

impl<A, B> Step for StepSequence<A, B>
where
    A: Step,
    B: Step<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn name(&self) -> &str {
        "sequence"
    }

    fn apply<'a>(&'a self, input: Sequence<'a, Self::Input>) -> Sequence<'a, Self::Output> {
        self.second.apply(self.first.apply(input))
    }

    fn describe(&self) -> Vec<String> {
        let mut names = self.first.describe();
        names.extend(self.second.describe());
        names
    }
}

/// A step that passes its input through unchanged.
pub struct Identity<T>(PhantomData<fn(T) -> T>);

impl<T> Identity<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Step for Identity<T> {
    type Input = T;
    type Output = T;

    fn name(&self) -> &str {
        "identity"
    }

    fn apply<'a>(&'a self, input: Sequence<'a, T>) -> Sequence<'a, T> {
        input
    }

    fn describe(&self) -> Vec<String> {
        Vec::new()
    }
}
