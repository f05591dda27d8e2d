//! # Stegosign
//!
//! Authenticate a message before hiding it in an image.
//!
//! ## Overview
//!
//! - **Session**: owns the current [`SigningContext`] and replaces it
//!   atomically when keys are regenerated
//! - **SigningContext**: an immutable key pair; signs and verifies
//! - **SignedEmbedder**: signs a message, wraps it in an envelope, and moves it
//!   through an [`EmbeddingCodec`]; on the way back it extracts, decodes, and
//!   verifies
//!
//! Key generation is CPU-bound and runs on tokio's blocking pool, optionally
//! under a deadline.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use stegosign::{Session, SessionConfig, SignedEmbedder};
//! use stegosign::codec::TrailerCodec;
//!
//! async fn example(image: Bytes) -> stegosign::Result<()> {
//!     let config = SessionConfig::default();
//!     let session = Session::new(config.clone()).await?;
//!     let embedder = SignedEmbedder::new(TrailerCodec::new(), &config);
//!
//!     let context = session.context().await;
//!     let sealed = embedder.seal(&context, &image, "hello world")?;
//!
//!     let opened = embedder.open(&context, &image, &sealed.carrier)?;
//!     assert!(opened.verdict.is_valid());
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `stegosign::core` - primes, keys, digests, signatures, envelopes
//! - `stegosign::codec` - the embedding codec contract

pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod session;

// Re-export component crates
pub use stegosign_codec as codec;
pub use stegosign_core as core;

pub use config::SessionConfig;
pub use context::{SigningContext, Verdict};
pub use error::{Result, StegoError};
pub use pipeline::{Opened, Sealed, SignedEmbedder};
pub use session::Session;

// Re-export commonly used types
pub use stegosign_codec::EmbeddingCodec;
pub use stegosign_core::{Envelope, KeyPair, PublicKey, Signature};
