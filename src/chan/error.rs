use core::fmt;

/// The error returned when sending into a channel that can no longer deliver
/// values.
///
/// This happens when the channel was closed, or when every [`Receiver`] was
/// dropped. The value that could not be sent is handed back.
///
/// [`Receiver`]: super::Receiver
#[derive(PartialEq, Eq, Clone, Copy, thiserror::Error)]
#[error("sending into a closed channel")]
pub struct SendError<T>(pub T);

impl<T> SendError<T> {
    /// Take back the value that could not be sent.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SendError").finish_non_exhaustive()
    }
}

/// The error returned by [`Receiver::try_recv`].
///
/// [`Receiver::try_recv`]: super::Receiver::try_recv
#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
pub enum TryRecvError {
    /// The channel is open but holds no values right now.
    #[error("receiving on an empty channel")]
    Empty,
    /// The channel is closed and fully drained.
    #[error("receiving on a closed channel")]
    Closed,
}
