use core::convert::Infallible;
use core::future::Future;

use super::UntilDone;
use crate::chan::{Receiver, Sender};
use crate::done::Done;

/// Why a stage task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exit {
    /// An input reached end-of-stream.
    Exhausted,
    /// The cancellation signal fired.
    Cancelled,
    /// A stage-specific stop condition was reached.
    Terminal,
    /// Every receiver of the output is gone.
    Disconnected,
}

/// Stage loops never finish on their own; they return through an [`Exit`].
pub(crate) type Run = Result<Infallible, Exit>;

/// Schedule a stage loop on the current tokio runtime.
///
/// The loop owns the stage's output senders, so they are dropped (and the
/// outputs closed) however the loop ends, unwinding included.
pub(crate) fn spawn<F>(stage: &'static str, run: F)
where
    F: Future<Output = Run> + Send + 'static,
{
    tracing::trace!(stage, "stage started");
    tokio::spawn(async move {
        let exit = match run.await {
            Ok(never) => match never {},
            Err(exit) => exit,
        };
        tracing::debug!(stage, ?exit, "stage finished");
    });
}

/// Receive the next input value unless cancelled first.
pub(crate) async fn recv<T>(done: &Done, input: &mut Receiver<T>) -> Result<T, Exit> {
    match UntilDone::new(input.recv(), done).await {
        Some(Some(value)) => Ok(value),
        Some(None) => Err(Exit::Exhausted),
        None => Err(Exit::Cancelled),
    }
}

/// Hand a value to an output unless cancelled first.
pub(crate) async fn send<T>(done: &Done, output: &Sender<T>, value: T) -> Result<(), Exit> {
    match UntilDone::new(output.send(value), done).await {
        Some(Ok(())) => Ok(()),
        Some(Err(_)) => Err(Exit::Disconnected),
        None => Err(Exit::Cancelled),
    }
}

/// Like [`send`], for stages with several outputs.
///
/// An output whose receivers are all gone is taken out of its slot, and
/// values later routed to an empty slot are discarded.
pub(crate) async fn offer<T>(
    done: &Done,
    slot: &mut Option<Sender<T>>,
    value: T,
) -> Result<(), Exit> {
    let Some(output) = slot.as_ref() else {
        return Ok(());
    };
    let sent = send(done, output, value).await;
    match sent {
        Err(Exit::Disconnected) => {
            *slot = None;
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chan::channel;
    use crate::done::Canceller;
    use futures_lite::future::block_on;

    #[test]
    fn recv_reports_exhaustion_and_cancellation() {
        block_on(async {
            let (tx, mut rx) = channel(1);
            tx.send(1).await.unwrap();
            drop(tx);

            let done = Done::never();
            assert_eq!(recv(&done, &mut rx).await, Ok(1));
            assert_eq!(recv(&done, &mut rx).await, Err(Exit::Exhausted));
            assert_eq!(recv(&Done::fired(), &mut rx).await, Err(Exit::Cancelled));
        })
    }

    #[test]
    fn send_reports_disconnect() {
        block_on(async {
            let (tx, rx) = channel(1);
            drop(rx);
            assert_eq!(send(&Done::never(), &tx, 1).await, Err(Exit::Disconnected));
        })
    }

    #[test]
    fn cancelled_send_does_not_deliver() {
        block_on(async {
            let (tx, mut rx) = channel(4);
            let canceller = Canceller::new();
            canceller.cancel();
            assert_eq!(send(&canceller.done(), &tx, 1).await, Err(Exit::Cancelled));
            drop(tx);
            assert_eq!(rx.recv().await, None);
        })
    }

    #[test]
    fn offer_empties_disconnected_slot() {
        block_on(async {
            let (tx, rx) = channel(1);
            drop(rx);
            let mut slot = Some(tx);
            let done = Done::never();
            assert_eq!(offer(&done, &mut slot, 1).await, Ok(()));
            assert!(slot.is_none());
            assert_eq!(offer(&done, &mut slot, 2).await, Ok(()));
        })
    }
}
