//! pktdecode core library
//!
//! Fundamental types shared by the header decoders: the error taxonomy,
//! protocol-identification constants, the bounds-checked [`ByteView`]
//! reader, and the [`Header`] trait every decoder implements.

pub mod byteview;
pub mod decoded;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use byteview::ByteView;
pub use decoded::{Decoded, Header};
pub use error::{DecodeError, Result};
pub use types::*;
