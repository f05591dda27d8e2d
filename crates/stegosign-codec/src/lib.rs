//! # Stegosign Codec
//!
//! The contract between stegosign and an image embedding codec.
//!
//! Stegosign does not know how pixels are modified. It hands a codec the
//! UTF-8 bytes of a signature envelope and expects exactly those bytes back
//! from extraction. [`EmbeddingCodec`] captures that contract; [`TrailerCodec`]
//! is an in-memory implementation for tests and demos.

pub mod codec;
pub mod error;
pub mod memory;

pub use codec::{Embedded, EmbeddingCodec};
pub use error::{CodecError, Result};
pub use memory::TrailerCodec;
