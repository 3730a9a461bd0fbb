use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use tokio_util::sync::WaitForCancellationFuture;

use crate::done::Done;

/// Races a future against a cancellation signal.
///
/// The signal is polled first, so once it has fired the inner future is never
/// polled again and an already computed value is not handed off. Resolves to
/// `None` when cancelled.
#[pin_project::pin_project]
#[must_use = "futures do nothing unless polled or .awaited"]
pub(crate) struct UntilDone<'a, F> {
    #[pin]
    future: F,
    #[pin]
    done: WaitForCancellationFuture<'a>,
    state: State,
}

#[derive(Debug)]
enum State {
    Pending,
    Completed,
}

impl<'a, F> UntilDone<'a, F> {
    pub(crate) fn new(future: F, done: &'a Done) -> Self {
        Self {
            future,
            done: done.wait(),
            state: State::Pending,
        }
    }
}

impl<F: Future> Future for UntilDone<'_, F> {
    type Output = Option<F::Output>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.state {
            State::Pending => {
                if this.done.poll(cx).is_ready() {
                    *this.state = State::Completed;
                    return Poll::Ready(None);
                }
                let value = match this.future.poll(cx) {
                    Poll::Ready(value) => value,
                    Poll::Pending => return Poll::Pending,
                };
                *this.state = State::Completed;
                Poll::Ready(Some(value))
            }
            State::Completed => panic!("future polled after completing"),
        }
    }
}
