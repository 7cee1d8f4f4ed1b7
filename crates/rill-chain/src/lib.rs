pub mod distinct;
pub mod filter;
pub mod flat_map;
pub mod map;
pub mod pipeline;
pub mod sort;
pub mod text;

pub mod prelude {
    pub use crate::distinct::Distinct;
    pub use crate::filter::Filter;
    pub use crate::flat_map::FlatMap;
    pub use crate::map::Map;
    pub use crate::pipeline::Pipeline;
    pub use crate::sort::Sorted;
    pub use crate::text::Splitter;
}
