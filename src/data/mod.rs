//! Shot data loading and caching

mod cache;
mod loader;

pub use cache::DatasetCache;
pub use loader::{LoadStats, SeasonLoader, read_shot_csv};
