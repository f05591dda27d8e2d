//! Session: holds the current signing context and replaces it atomically.
//!
//! Readers take a snapshot (`Arc<SigningContext>`) and keep using it even if
//! the session regenerates keys meanwhile. Regeneration builds the new
//! context entirely on a blocking thread and only then swaps it in, so no
//! reader ever sees a half-built key pair. Regenerations are serialised:
//! each one publishes the context it returns, with the next generation
//! number.

use std::sync::Arc;
use std::time::Instant;

use stegosign_core::{CancelToken, KeyPairGenerator, PublicKey};
use tokio::sync::{Mutex, RwLock};

use crate::config::SessionConfig;
use crate::context::SigningContext;
use crate::error::{Result, StegoError};

/// A signing session.
pub struct Session {
    config: SessionConfig,
    current: RwLock<Arc<SigningContext>>,
    regenerating: Mutex<()>,
}

impl Session {
    /// Create a session, generating its first key pair off the async runtime.
    pub async fn new(config: SessionConfig) -> Result<Self> {
        let context = generate_context(&config, 0).await?;
        Ok(Self::with_context(config, context))
    }

    /// Create a session around an existing context.
    pub fn with_context(config: SessionConfig, context: SigningContext) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(context)),
            regenerating: Mutex::new(()),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot of the current context.
    pub async fn context(&self) -> Arc<SigningContext> {
        Arc::clone(&*self.current.read().await)
    }

    /// Current public key.
    pub async fn public_key(&self) -> PublicKey {
        self.context().await.public_key().clone()
    }

    /// Replace the current key pair with a freshly generated one.
    ///
    /// Concurrent calls run one after another. On failure (timeout, invalid
    /// configuration) or when the future is dropped, the previous context
    /// stays in place.
    pub async fn regenerate(&self) -> Result<Arc<SigningContext>> {
        let _regenerating = self.regenerating.lock().await;
        let generation = self.context().await.generation() + 1;
        let next = Arc::new(generate_context(&self.config, generation).await?);

        let mut current = self.current.write().await;
        *current = Arc::clone(&next);
        tracing::info!(
            generation,
            fingerprint = %next.public_key().fingerprint(),
            "signing keys replaced"
        );
        Ok(next)
    }
}

/// Cancels key generation when the waiting future goes away.
struct CancelOnDrop(CancelToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// Run key generation on the blocking pool, honouring the configured
/// deadline.
async fn generate_context(config: &SessionConfig, generation: u64) -> Result<SigningContext> {
    let token = CancelToken::new();
    let generator = KeyPairGenerator::new(config.key_bits)?
        .witnesses(config.witness_count)
        .cancel_token(token.clone());
    let _cancel_on_drop = CancelOnDrop(token);

    tracing::debug!(bits = config.key_bits, generation, "generating signing keys");
    let started = Instant::now();
    let task = tokio::task::spawn_blocking(move || generator.generate());

    let joined = match config.keygen_timeout {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => {
                // dropping the guard stops the blocking loop at its next candidate
                tracing::warn!(bits = config.key_bits, ?limit, "key generation timed out");
                return Err(StegoError::KeygenTimeout(limit));
            }
        },
        None => task.await,
    };
    let (keypair, stats) = joined.map_err(|e| StegoError::KeygenTask(e.to_string()))??;

    tracing::info!(
        bits = config.key_bits,
        generation,
        prime_attempts = stats.prime_attempts,
        equal_prime_retries = stats.equal_prime_retries,
        inverse_retries = stats.inverse_retries,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "generated signing keys"
    );
    Ok(SigningContext::from_generated(keypair, stats, generation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Verdict;
    use std::time::Duration;
    use stegosign_core::CoreError;

    #[tokio::test]
    async fn test_new_session_has_keys() {
        let session = Session::new(SessionConfig::default()).await.unwrap();
        let context = session.context().await;
        assert_eq!(context.generation(), 0);
        assert!(context.stats().prime_attempts >= 2);
        assert_eq!(session.public_key().await, *context.public_key());
    }

    #[tokio::test]
    async fn test_regenerate_swaps_context() {
        let session = Session::new(SessionConfig::default()).await.unwrap();
        let before = session.context().await;
        let signature = before.sign("hello");

        let after = session.regenerate().await.unwrap();
        assert_eq!(after.generation(), 1);
        assert_eq!(session.context().await.generation(), 1);

        // the old snapshot is untouched and still verifies its own signature
        assert_eq!(before.verify("hello", &signature), Verdict::Valid);
        assert_eq!(after.verify("hello", &signature), Verdict::Invalid);
    }

    #[tokio::test]
    async fn test_timeout_keeps_previous_context() {
        let config = SessionConfig::default();
        let context = SigningContext::generate(&config).unwrap();
        let fingerprint = context.public_key().fingerprint();

        let slow = config.key_bits(4096).keygen_timeout(Duration::from_nanos(1));
        let session = Session::with_context(slow, context);

        let err = session.regenerate().await.unwrap_err();
        assert!(matches!(err, StegoError::KeygenTimeout(_)));
        assert_eq!(session.public_key().await.fingerprint(), fingerprint);
    }

    #[tokio::test]
    async fn test_invalid_key_size() {
        let err = Session::new(SessionConfig::default().key_bits(64))
            .await
            .err()
            .unwrap();
        assert!(matches!(
            err,
            StegoError::Core(CoreError::KeyTooSmall { requested: 64, .. })
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_regenerations_are_serialised() {
        let session = Arc::new(Session::new(SessionConfig::default()).await.unwrap());

        let a = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.regenerate().await.unwrap() }
        });
        let b = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.regenerate().await.unwrap() }
        });
        let (a, b) = (a.await.unwrap(), b.await.unwrap());

        let mut generations = [a.generation(), b.generation()];
        generations.sort_unstable();
        assert_eq!(generations, [1, 2]);

        // the later regeneration is the one left published
        let last = if a.generation() == 2 { a } else { b };
        let current = session.context().await;
        assert_eq!(current.generation(), 2);
        assert_eq!(current.public_key(), last.public_key());
        let signature = last.sign("after both");
        assert_eq!(current.verify("after both", &signature), Verdict::Valid);
    }

    #[test]
    fn test_dropped_guard_cancels_token() {
        let token = CancelToken::new();
        let guard = CancelOnDrop(token.clone());
        assert!(!token.is_cancelled());
        drop(guard);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_abandoned_regeneration_keeps_context() {
        let config = SessionConfig::default();
        let context = SigningContext::generate(&config).unwrap();
        let fingerprint = context.public_key().fingerprint();
        let session = Session::with_context(config.key_bits(4096), context);

        let abandoned = tokio::time::timeout(Duration::from_millis(1), session.regenerate()).await;
        assert!(abandoned.is_err());
        assert_eq!(session.public_key().await.fingerprint(), fingerprint);
        assert_eq!(session.context().await.generation(), 0);

        // the regeneration lock was released with the dropped future
        assert!(session.regenerating.try_lock().is_ok());
    }
}
