pub mod splitter_config;

pub use splitter_config::{load_splitters, SplitterConfig};
