use crate::mask::{AssetKind, MaskEvent, MaskState};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The compositor received an event its current state does not accept.
    #[error("mask compositor cannot handle {event:?} while {state:?}")]
    InvalidTransition { state: MaskState, event: MaskEvent },

    #[error("failed to load {asset} from {src}")]
    AssetLoad { asset: AssetKind, src: String },

    #[error("pixel buffers differ in length (dst {dst}, src {src})")]
    BufferMismatch { dst: usize, src: usize },

    /// Anything the browser reported back through a `JsValue`.
    #[error("host error: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, Error>;
