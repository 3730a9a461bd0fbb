use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Run};

impl Flow {
    /// Pass on the elements of each received collection, one by one.
    ///
    /// Empty collections emit nothing. Cancellation is checked on every
    /// element, not only between collections.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures_flows::Flow;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let flow = Flow::new();
    /// let batches = flow.generate([vec![1, 2], vec![], vec![3]]);
    /// let flat = flow.flatten(batches);
    /// assert_eq!(flow.collect(flat).await, [1, 2, 3]);
    /// # }
    /// ```
    pub fn flatten<I>(&self, input: Receiver<I>) -> Receiver<I::Item>
    where
        I: IntoIterator + Send + 'static,
        I::IntoIter: Send,
        I::Item: Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn("flatten", run_flatten(self.done.clone(), input, tx));
        rx
    }
}

async fn run_flatten<I>(done: Done, mut input: Receiver<I>, output: Sender<I::Item>) -> Run
where
    I: IntoIterator,
{
    loop {
        let batch = utils::recv(&done, &mut input).await?;
        for value in batch {
            utils::send(&done, &output, value).await?;
        }
    }
}

/// [`Flow::flatten`] with the default options.
pub fn flatten<I>(input: Receiver<I>) -> Receiver<I::Item>
where
    I: IntoIterator + Send + 'static,
    I::IntoIter: Send,
    I::Item: Send + 'static,
{
    Flow::default().flatten(input)
}
