use err_derive::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Sheet layout that would divide by zero or never advance
    #[error(display = "Invalid sprite sheet configuration: {}", reason)]
    InvalidConfig { reason: String },
    /// Requested frame outside of what `set_frame` accepts
    #[error(display = "Frame {} out of bounds (sheet has {} frames)", frame, amount_frames)]
    FrameOutOfRange { frame: usize, amount_frames: usize },
}

impl Error {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            reason: reason.into(),
        }
    }
}
