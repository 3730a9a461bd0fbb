use core::pin::pin;

use futures_core::Stream;
use futures_lite::StreamExt;

use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Exit, Run, UntilDone};

impl Flow {
    /// Emit `items` in order, then close the output.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures_flows::Flow;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let flow = Flow::new();
    /// let letters = flow.generate(["a", "b", "c"]);
    /// assert_eq!(flow.collect(letters).await, ["a", "b", "c"]);
    /// # }
    /// ```
    pub fn generate<I>(&self, items: I) -> Receiver<I::Item>
    where
        I: IntoIterator,
        I::IntoIter: Send + 'static,
        I::Item: Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn(
            "generate",
            run_generate(self.done.clone(), items.into_iter(), tx),
        );
        rx
    }

    /// Pump every item of `stream` into a new flow.
    ///
    /// This bridges any [`Stream`] into a pipeline. The stream is polled from
    /// the stage task and dropped when the stage ends.
    pub fn forward<S>(&self, stream: S) -> Receiver<S::Item>
    where
        S: Stream + Send + 'static,
        S::Item: Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn("forward", run_forward(self.done.clone(), stream, tx));
        rx
    }
}

async fn run_generate<I>(done: Done, items: I, output: Sender<I::Item>) -> Run
where
    I: Iterator,
{
    for item in items {
        utils::send(&done, &output, item).await?;
    }
    Err(Exit::Exhausted)
}

async fn run_forward<S>(done: Done, stream: S, output: Sender<S::Item>) -> Run
where
    S: Stream,
{
    let mut stream = pin!(stream);
    loop {
        let item = match UntilDone::new(stream.next(), &done).await {
            Some(Some(item)) => item,
            Some(None) => return Err(Exit::Exhausted),
            None => return Err(Exit::Cancelled),
        };
        utils::send(&done, &output, item).await?;
    }
}

/// [`Flow::generate`] with the default options.
pub fn generate<I>(items: I) -> Receiver<I::Item>
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
{
    Flow::default().generate(items)
}

/// [`Flow::forward`] with the default options.
pub fn forward<S>(stream: S) -> Receiver<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
{
    Flow::default().forward(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::done::Canceller;
    use futures_lite::stream;

    #[tokio::test]
    async fn generate_in_order() {
        let flow = Flow::new();
        let rx = flow.generate(vec![3, 1, 2]);
        assert_eq!(flow.collect(rx).await, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn generate_empty_closes() {
        let mut rx = generate(Vec::<u8>::new());
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn generate_stops_on_cancel() {
        let canceller = Canceller::new();
        let flow = Flow::new().with_done(canceller.done());
        let mut rx = flow.generate(0..);
        assert_eq!(rx.recv().await, Some(0));
        assert_eq!(rx.recv().await, Some(1));
        canceller.cancel();

        // At most the send already in flight gets through.
        let rest: Vec<u64> = crate::collect(rx).await;
        assert!(rest.len() <= 1, "{rest:?}");
    }

    #[tokio::test]
    async fn forward_stream() {
        let rx = forward(stream::iter(vec!['x', 'y']));
        assert_eq!(crate::collect(rx).await, vec!['x', 'y']);
    }
}
