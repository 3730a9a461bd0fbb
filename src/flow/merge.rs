use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Run};

impl Flow {
    /// Combine several inputs into one output.
    ///
    /// One reader task is spawned per input. Values from the same input keep
    /// their order; values from different inputs interleave in whatever order
    /// they arrive. The output closes once every reader has finished.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures_flows::Flow;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let flow = Flow::new();
    /// let a = flow.generate([1, 2]);
    /// let b = flow.generate([3, 4]);
    /// let mut all = flow.collect(flow.merge([a, b])).await;
    /// all.sort_unstable();
    /// assert_eq!(all, [1, 2, 3, 4]);
    /// # }
    /// ```
    pub fn merge<T, I>(&self, inputs: I) -> Receiver<T>
    where
        T: Send + 'static,
        I: IntoIterator<Item = Receiver<T>>,
    {
        let (tx, rx) = self.channel();
        // Every reader holds a clone of `tx`; the output closes when the
        // last reader drops its clone.
        for input in inputs {
            utils::spawn("merge", run_merge(self.done.clone(), input, tx.clone()));
        }
        rx
    }
}

async fn run_merge<T>(done: Done, mut input: Receiver<T>, output: Sender<T>) -> Run {
    loop {
        let value = utils::recv(&done, &mut input).await?;
        utils::send(&done, &output, value).await?;
    }
}

/// [`Flow::merge`] with the default options.
pub fn merge<T, I>(inputs: I) -> Receiver<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = Receiver<T>>,
{
    Flow::default().merge(inputs)
}
