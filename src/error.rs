// Crate-wide error type.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The supplied surface cannot hand out a 2D drawing context.
    #[error("surface has no 2D drawing context")]
    ContextUnavailable,
    /// An operation that needs a bound primary surface ran before `init`.
    #[error("engine used before init()")]
    NotInitialized,
    /// Dropper constants that cannot produce a centered magnifier.
    #[error("invalid dropper config: {0}")]
    InvalidConfig(String),
    /// Opening or decoding the source image failed.
    #[error("image load error: {0}")]
    ImageLoad(String),
    /// Creating the window failed.
    #[error("window init error: {0}")]
    WindowInit(String),
    /// Updating the window buffer failed.
    #[error("window update error: {0}")]
    WindowUpdate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
