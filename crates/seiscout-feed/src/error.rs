//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Feed already started")]
    AlreadyStarted,

    #[error("Feed stopped")]
    Stopped,

    #[error("Invalid feed configuration: {0}")]
    InvalidConfig(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
