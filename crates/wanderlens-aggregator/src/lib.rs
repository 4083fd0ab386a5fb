pub mod hierarchy;
pub mod pagination;
pub mod pipeline;
pub mod scoring;
pub mod types;

pub use hierarchy::expand_hierarchy;
pub use pagination::{page_window, PageWindow};
pub use pipeline::ImageAggregator;
pub use types::{AggregateOutcome, ImageSource, ScoredImage};
