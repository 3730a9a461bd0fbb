use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Exit, Run};

impl Flow {
    /// Pass on values until `predicate` first returns `false`.
    ///
    /// The value that failed the predicate is not passed on. The stage then
    /// closes its output and drops `input` without draining it.
    pub fn take_while<T, F>(&self, input: Receiver<T>, predicate: F) -> Receiver<T>
    where
        T: Send + 'static,
        F: FnMut(&T) -> bool + Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn(
            "take_while",
            run_take_while(self.done.clone(), input, tx, predicate),
        );
        rx
    }

    /// Pass on the first `n` values, then close the output.
    ///
    /// With `n == 0` the output closes without reading anything. Like
    /// [`Flow::take_while`], the rest of `input` is not drained.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures_flows::Flow;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let flow = Flow::new();
    /// let naturals = flow.generate(1..);
    /// let three = flow.take(naturals, 3);
    /// assert_eq!(flow.collect(three).await, [1, 2, 3]);
    /// # }
    /// ```
    pub fn take<T>(&self, input: Receiver<T>, n: usize) -> Receiver<T>
    where
        T: Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn("take", run_take(self.done.clone(), input, tx, n));
        rx
    }
}

async fn run_take_while<T, F>(
    done: Done,
    mut input: Receiver<T>,
    output: Sender<T>,
    mut predicate: F,
) -> Run
where
    F: FnMut(&T) -> bool,
{
    loop {
        let value = utils::recv(&done, &mut input).await?;
        if !predicate(&value) {
            return Err(Exit::Terminal);
        }
        utils::send(&done, &output, value).await?;
    }
}

async fn run_take<T>(done: Done, mut input: Receiver<T>, output: Sender<T>, n: usize) -> Run {
    for _ in 0..n {
        let value = utils::recv(&done, &mut input).await?;
        utils::send(&done, &output, value).await?;
    }
    Err(Exit::Terminal)
}

/// [`Flow::take_while`] with the default options.
pub fn take_while<T, F>(input: Receiver<T>, predicate: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnMut(&T) -> bool + Send + 'static,
{
    Flow::default().take_while(input, predicate)
}

/// [`Flow::take`] with the default options.
pub fn take<T>(input: Receiver<T>, n: usize) -> Receiver<T>
where
    T: Send + 'static,
{
    Flow::default().take(input, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chan::channel;
    use crate::done::Canceller;
    use crate::{collect, generate};
    use std::time::Duration;

    #[tokio::test]
    async fn take_prefix() {
        assert_eq!(collect(take(generate(1..=5), 3)).await, vec![1, 2, 3]);
        assert_eq!(collect(take(generate(1..=2), 3)).await, vec![1, 2]);
    }

    #[tokio::test]
    async fn take_zero_reads_nothing() {
        let (tx, rx) = channel::<u8>(1);
        let mut out = take(rx, 0);
        assert_eq!(out.recv().await, None);
        // The input was dropped unread.
        assert!(tx.send(1).await.is_err());
    }

    #[tokio::test]
    async fn take_from_endless_source() {
        let flow = Flow::new().with_capacity(2);
        let out = flow.take(flow.generate(0u64..), 4);
        assert_eq!(flow.collect(out).await, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn take_while_longest_prefix() {
        let out = take_while(generate([2, 4, 6, 7, 8, 10]), |n| n % 2 == 0);
        assert_eq!(collect(out).await, vec![2, 4, 6]);
    }

    #[tokio::test]
    async fn take_while_all() {
        let out = take_while(generate([1, 2, 3]), |_| true);
        assert_eq!(collect(out).await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn cancel_closes_output() {
        let canceller = Canceller::new();
        let flow = Flow::new().with_done(canceller.done());
        let (_counted, counted) = channel::<u8>(0);
        let (_guarded, guarded) = channel::<u8>(0);
        let mut take = flow.take(counted, 5);
        let mut take_while = flow.take_while(guarded, |n| *n < 10);

        canceller.cancel();
        let limit = Duration::from_secs(5);
        assert_eq!(tokio::time::timeout(limit, take.recv()).await.unwrap(), None);
        assert_eq!(tokio::time::timeout(limit, take_while.recv()).await.unwrap(), None);
    }
}
