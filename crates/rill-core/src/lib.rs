pub mod config;
pub mod error;
pub mod sequence;
pub mod step;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::RunConfig;
    pub use crate::error::{InputError, Result, RillError, StepError};
    pub use crate::sequence::Sequence;
    pub use crate::step::{Identity, Step, StepExt, StepSequence};
}
