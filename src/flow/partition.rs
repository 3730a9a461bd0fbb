use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Exit, Run};

impl Flow {
    /// Split `input` in two by `predicate`.
    ///
    /// Returns `(satisfied, not_satisfied)`. Each value is routed to exactly
    /// one side. Both outputs are fed from one task, so both must be consumed
    /// concurrently.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures_flows::Flow;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let flow = Flow::new();
    /// let (even, odd) = flow.partition(flow.generate(1..=5), |n| n % 2 == 0);
    /// let odd = tokio::spawn(futures_flows::collect(odd));
    /// assert_eq!(flow.collect(even).await, [2, 4]);
    /// assert_eq!(odd.await.unwrap(), [1, 3, 5]);
    /// # }
    /// ```
    pub fn partition<T, F>(&self, input: Receiver<T>, predicate: F) -> (Receiver<T>, Receiver<T>)
    where
        T: Send + 'static,
        F: FnMut(&T) -> bool + Send + 'static,
    {
        let (yes_tx, yes_rx) = self.channel();
        let (no_tx, no_rx) = self.channel();
        utils::spawn(
            "partition",
            run_partition(self.done.clone(), input, yes_tx, no_tx, predicate),
        );
        (yes_rx, no_rx)
    }
}

async fn run_partition<T, F>(
    done: Done,
    mut input: Receiver<T>,
    satisfied: Sender<T>,
    not_satisfied: Sender<T>,
    mut predicate: F,
) -> Run
where
    F: FnMut(&T) -> bool,
{
    let mut satisfied = Some(satisfied);
    let mut not_satisfied = Some(not_satisfied);
    loop {
        let value = utils::recv(&done, &mut input).await?;
        let slot = if predicate(&value) {
            &mut satisfied
        } else {
            &mut not_satisfied
        };
        utils::offer(&done, slot, value).await?;
        if satisfied.is_none() && not_satisfied.is_none() {
            return Err(Exit::Disconnected);
        }
    }
}

/// [`Flow::partition`] with the default options.
pub fn partition<T, F>(input: Receiver<T>, predicate: F) -> (Receiver<T>, Receiver<T>)
where
    T: Send + 'static,
    F: FnMut(&T) -> bool + Send + 'static,
{
    Flow::default().partition(input, predicate)
}
