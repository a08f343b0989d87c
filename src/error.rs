use thiserror::Error;

/// Errors raised while building predicates, separators and splitters,
/// or while driving a lazy iterator.
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing required setting: {0}")]
    MissingArgument(&'static str),

    #[error("the separator may not be the empty string")]
    EmptySeparator,

    #[error("the pattern may not match the empty string: `{0}`")]
    EmptyMatchingPattern(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("the chunk length must be greater than zero, got {0}")]
    InvalidChunkLength(usize),

    #[error("the limit must be greater than zero, got {0}")]
    InvalidLimit(usize),

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("index {0} is not on a char boundary")]
    NotCharBoundary(usize),

    #[error("invalid splitter configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no element is available")]
    NoSuchElement,

    #[error("iterator failed while computing its next element")]
    IteratorFailed,
}

pub type Result<T> = std::result::Result<T, Error>;
