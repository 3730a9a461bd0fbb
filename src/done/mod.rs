//! One-shot cancellation signals.
//!
//! A [`Done`] is a read-only, cloneable handle that any number of tasks can
//! wait on. It is fired through the [`Canceller`] it came from, and once
//! fired it stays fired. Signals can be combined with [`some_done`] and
//! [`every_done`].
//!
//! # Examples
//!
//! ```
//! use futures_flows::done::Canceller;
//!
//! # futures_lite::future::block_on(async {
//! let canceller = Canceller::new();
//! let done = canceller.done();
//! assert!(!done.is_done());
//!
//! canceller.cancel();
//! done.wait().await;
//! assert!(done.is_done());
//! # });
//! ```

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

mod combine;

pub use combine::{every_done, some_done};

/// A read-only cancellation signal.
///
/// The default value never fires.
#[derive(Debug, Clone, Default)]
pub struct Done {
    token: CancellationToken,
}

impl Done {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self::default()
    }

    /// A signal that has already fired.
    pub fn fired() -> Self {
        let token = CancellationToken::new();
        token.cancel();
        Self { token }
    }

    /// Returns `true` once the signal has fired.
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until the signal fires. Resolves immediately if it already has.
    pub fn wait(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

impl From<CancellationToken> for Done {
    fn from(token: CancellationToken) -> Self {
        Self { token }
    }
}

/// The firing side of a [`Done`] signal.
///
/// Dropping a `Canceller` does not fire its signal.
#[derive(Debug, Clone, Default)]
pub struct Canceller {
    token: CancellationToken,
}

impl Canceller {
    /// Create a new, unfired canceller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal, waking every waiter. Firing twice is a no-op.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once [`Canceller::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A read-only handle to this canceller's signal.
    pub fn done(&self) -> Done {
        Done {
            token: self.token.clone(),
        }
    }
}
