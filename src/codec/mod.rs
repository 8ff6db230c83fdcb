//! Codec layer: object handle rendering and 32-bit integer buffers.

pub mod error;
pub mod handle;
pub mod int32;

pub use error::{CodecError, CodecResult};
