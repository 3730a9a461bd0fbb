use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Exit, Run};

impl Flow {
    /// Broadcast every value of `input` to `n` outputs.
    ///
    /// Each value is sent to output `0`, then `1`, and so on, before the next
    /// value is read, so the input moves at the pace of the slowest consumer.
    /// All outputs must be consumed concurrently. With `n == 0` the input is
    /// dropped and no outputs are returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures_flows::Flow;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let flow = Flow::new();
    /// let outputs = flow.fan_out(flow.generate([1, 2, 3]), 2);
    /// let handles: Vec<_> = outputs
    ///     .into_iter()
    ///     .map(|rx| tokio::spawn(futures_flows::collect(rx)))
    ///     .collect();
    /// for handle in handles {
    ///     assert_eq!(handle.await.unwrap(), [1, 2, 3]);
    /// }
    /// # }
    /// ```
    pub fn fan_out<T>(&self, input: Receiver<T>, n: usize) -> Vec<Receiver<T>>
    where
        T: Clone + Send + 'static,
    {
        let (txs, rxs) = self.channels(n);
        if n > 0 {
            utils::spawn("fan_out", run_fan_out(self.done.clone(), input, txs));
        }
        rxs
    }
}

async fn run_fan_out<T>(done: Done, mut input: Receiver<T>, outputs: Vec<Sender<T>>) -> Run
where
    T: Clone,
{
    let mut outputs: Vec<Option<Sender<T>>> = outputs.into_iter().map(Some).collect();
    loop {
        let value = utils::recv(&done, &mut input).await?;
        if let Some((last, rest)) = outputs.split_last_mut() {
            for slot in rest {
                utils::offer(&done, slot, value.clone()).await?;
            }
            utils::offer(&done, last, value).await?;
        }
        if outputs.iter().all(Option::is_none) {
            return Err(Exit::Disconnected);
        }
    }
}

/// [`Flow::fan_out`] with the default options.
pub fn fan_out<T>(input: Receiver<T>, n: usize) -> Vec<Receiver<T>>
where
    T: Clone + Send + 'static,
{
    Flow::default().fan_out(input, n)
}
