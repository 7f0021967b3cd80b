//! The single in-flight artwork buffer.
//!
//! At most one buffer is alive at a time: installing a replacement (or
//! clearing) drops the previous one. Installs are tagged with a generation
//! token so a completion that raced a newer track change is discarded
//! instead of overwriting it.

use std::sync::Arc;

/// Token handed out by [`ArtworkStore::begin`]; only the newest token can
/// install.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ArtworkToken(u64);

/// Owner of the current artwork bytes.
#[derive(Debug, Default)]
pub struct ArtworkStore {
    generation: u64,
    buffer: Option<Arc<[u8]>>,
}

impl ArtworkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an update. Invalidates every earlier token.
    pub fn begin(&mut self) -> ArtworkToken {
        self.generation += 1;
        ArtworkToken(self.generation)
    }

    /// Install `bytes` (or clear with `None`) if `token` is still current.
    ///
    /// Returns `false` when the token has been superseded; the completion
    /// is dropped and the buffer is left as-is.
    pub fn install(&mut self, token: ArtworkToken, bytes: Option<Vec<u8>>) -> bool {
        if token.0 != self.generation {
            tracing::debug!(
                token = token.0,
                current = self.generation,
                "discarding stale artwork install"
            );
            return false;
        }
        self.buffer = bytes.map(|bytes| Arc::from(bytes));
        true
    }

    /// The live thumbnail reference, if any.
    pub fn current(&self) -> Option<Arc<[u8]>> {
        self.buffer.clone()
    }
}

#[cfg(test)]
mod tests;
