use futures_lite::future;
use std::future::Future;
use std::task::Poll;
use tokio_util::sync::CancellationToken;

use super::Done;

/// Combine signals into one that fires as soon as any of them fires.
///
/// With no inputs the result never fires; with a single input that input is
/// returned as-is. Otherwise a single task spawned on the current tokio
/// runtime races every input and fires the result on the first one.
///
/// # Examples
///
/// ```
/// use futures_flows::done::{some_done, Canceller};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let a = Canceller::new();
/// let b = Canceller::new();
/// let any = some_done([a.done(), b.done()]);
///
/// b.cancel();
/// any.wait().await;
/// assert!(!a.is_cancelled());
/// # }
/// ```
pub fn some_done<I>(signals: I) -> Done
where
    I: IntoIterator<Item = Done>,
{
    let mut signals: Vec<Done> = signals.into_iter().collect();
    if signals.len() <= 1 {
        return signals.pop().unwrap_or_default();
    }
    if signals.iter().any(Done::is_done) {
        return Done::fired();
    }

    let result = CancellationToken::new();
    let token = result.clone();
    tracing::trace!(inputs = signals.len(), "spawning some_done waiter");
    tokio::spawn(async move {
        let mut waits: Vec<_> = signals
            .iter()
            .map(|signal| Box::pin(signal.wait()))
            .collect();
        future::poll_fn(|cx| {
            if waits.iter_mut().any(|wait| wait.as_mut().poll(cx).is_ready()) {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await;
        token.cancel();
    });
    Done::from(result)
}

/// Combine signals into one that fires once all of them have fired.
///
/// With no inputs the result has already fired; with a single input that
/// input is returned as-is. Otherwise a single task waits on each input in
/// turn and fires the result after the last one.
///
/// # Examples
///
/// ```
/// use futures_flows::done::{every_done, Canceller};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let a = Canceller::new();
/// let b = Canceller::new();
/// let all = every_done([a.done(), b.done()]);
///
/// a.cancel();
/// assert!(!all.is_done());
/// b.cancel();
/// all.wait().await;
/// # }
/// ```
pub fn every_done<I>(signals: I) -> Done
where
    I: IntoIterator<Item = Done>,
{
    let mut signals: Vec<Done> = signals.into_iter().collect();
    if signals.len() <= 1 {
        return signals.pop().unwrap_or_else(Done::fired);
    }
    signals.retain(|signal| !signal.is_done());
    if signals.is_empty() {
        return Done::fired();
    }

    let result = CancellationToken::new();
    let token = result.clone();
    tracing::trace!(inputs = signals.len(), "spawning every_done waiter");
    tokio::spawn(async move {
        for signal in &signals {
            signal.wait().await;
        }
        token.cancel();
    });
    Done::from(result)
}
