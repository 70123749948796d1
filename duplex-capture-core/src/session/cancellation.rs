use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Clonable stop signal for a capture session.
///
/// Handed to the drain loop explicitly and polled once per outer tick, so
/// the current tick always finishes draining before the loop exits. Any
/// clone may cancel, from any thread (e.g. a console interrupt handler).
/// Cancellation is one-way; a token is never reset.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uncancelled() {
        assert!(!CancellationToken::new().is_cancelled());
    }

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let observer = token.clone();

        token.cancel();

        assert!(observer.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn cancel_is_idempotent() {
        let token = CancellationToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }
}
