use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Exit, Run};

impl Flow {
    /// Pass on every value of the first input, then of the second, and so
    /// on.
    ///
    /// Input `k + 1` is not read before input `k` is exhausted.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures_flows::Flow;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let flow = Flow::new().with_capacity(2);
    /// let a = flow.generate([1, 2]);
    /// let b = flow.generate([3]);
    /// assert_eq!(flow.collect(flow.concat([a, b])).await, [1, 2, 3]);
    /// # }
    /// ```
    pub fn concat<T, I>(&self, inputs: I) -> Receiver<T>
    where
        T: Send + 'static,
        I: IntoIterator<Item = Receiver<T>>,
    {
        let (tx, rx) = self.channel();
        let inputs: Vec<_> = inputs.into_iter().collect();
        utils::spawn("concat", run_concat(self.done.clone(), inputs, tx));
        rx
    }
}

async fn run_concat<T>(done: Done, inputs: Vec<Receiver<T>>, output: Sender<T>) -> Run {
    for mut input in inputs {
        loop {
            match utils::recv(&done, &mut input).await {
                Ok(value) => utils::send(&done, &output, value).await?,
                Err(Exit::Exhausted) => break,
                Err(exit) => return Err(exit),
            }
        }
    }
    Err(Exit::Exhausted)
}

/// [`Flow::concat`] with the default options.
pub fn concat<T, I>(inputs: I) -> Receiver<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = Receiver<T>>,
{
    Flow::default().concat(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chan::channel;
    use crate::done::Canceller;
    use crate::{collect, generate};
    use std::time::Duration;

    #[tokio::test]
    async fn concat_in_order() {
        let out = concat([generate([1, 2]), generate([]), generate([3, 4, 5])]);
        assert_eq!(collect(out).await, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn concat_nothing() {
        assert!(collect(concat(Vec::<Receiver<u8>>::new())).await.is_empty());
    }

    #[tokio::test]
    async fn later_inputs_wait_for_earlier_ones() {
        let (first_tx, first) = channel(0);
        let (second_tx, second) = channel(4);
        let mut out = concat([first, second]);

        second_tx.send("b").await.unwrap();
        drop(second_tx);
        first_tx.send("a").await.unwrap();
        assert_eq!(out.recv().await, Some("a"));

        // `second` is buffered but not read until `first` is closed.
        tokio::task::yield_now().await;
        assert!(out.try_recv().is_err());
        drop(first_tx);
        assert_eq!(out.recv().await, Some("b"));
        assert_eq!(out.recv().await, None);
    }

    #[tokio::test]
    async fn cancel_closes_output() {
        let canceller = Canceller::new();
        let flow = Flow::new().with_done(canceller.done());
        let (first_tx, first) = channel(0);
        let (_second_tx, second) = channel(0);
        let mut out = flow.concat([first, second]);

        first_tx.send(1).await.unwrap();
        assert_eq!(out.recv().await, Some(1));
        canceller.cancel();
        let closed = tokio::time::timeout(Duration::from_secs(5), out.recv()).await;
        assert_eq!(closed.unwrap(), None);
    }
}
