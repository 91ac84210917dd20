use thiserror::Error;
use crate::common::types::PageId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Cannot choose a victim from an empty frame set")]
    EmptyFrameSet,
    #[error("Clock sweep visited {0} slots without finding a victim")]
    SweepExhausted(usize),
    #[error("Page {0} is resident but has no usage entry")]
    UntrackedPage(PageId),
    #[error("Unknown replacement policy: {0}")]
    UnknownPolicy(String),
}

pub type Result<T> = std::result::Result<T, PolicyError>;
