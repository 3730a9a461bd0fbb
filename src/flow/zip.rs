use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Exit, Run};

impl Flow {
    /// Pair up values from `a` and `b` and combine each pair with `f`.
    ///
    /// Values are read in lock-step, `a` before `b`. The output closes as soon
    /// as either input is exhausted; the other input is dropped undrained.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures_flows::Flow;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let flow = Flow::new();
    /// let numbers = flow.generate([1, 2, 3, 4]);
    /// let letters = flow.generate(["a", "b", "c"]);
    /// let zipped = flow.zip(numbers, letters, |n, s| format!("{n}{s}"));
    /// assert_eq!(flow.collect(zipped).await, ["1a", "2b", "3c"]);
    /// # }
    /// ```
    pub fn zip<A, B, C, F>(&self, a: Receiver<A>, b: Receiver<B>, f: F) -> Receiver<C>
    where
        A: Send + 'static,
        B: Send + 'static,
        C: Send + 'static,
        F: FnMut(A, B) -> C + Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn("zip", run_zip(self.done.clone(), a, b, tx, f));
        rx
    }

    /// Split each value in two with `split`.
    ///
    /// Returns `(left, right)`. For every input value the left half is sent
    /// first, then the right half, from one task, so both outputs must be
    /// consumed concurrently.
    pub fn unzip<T, A, B, F>(&self, input: Receiver<T>, split: F) -> (Receiver<A>, Receiver<B>)
    where
        T: Send + 'static,
        A: Send + 'static,
        B: Send + 'static,
        F: FnMut(T) -> (A, B) + Send + 'static,
    {
        let (left_tx, left_rx) = self.channel();
        let (right_tx, right_rx) = self.channel();
        utils::spawn(
            "unzip",
            run_unzip(self.done.clone(), input, left_tx, right_tx, split),
        );
        (left_rx, right_rx)
    }
}

async fn run_zip<A, B, C, F>(
    done: Done,
    mut a: Receiver<A>,
    mut b: Receiver<B>,
    output: Sender<C>,
    mut f: F,
) -> Run
where
    F: FnMut(A, B) -> C,
{
    loop {
        let left = utils::recv(&done, &mut a).await?;
        let right = utils::recv(&done, &mut b).await?;
        utils::send(&done, &output, f(left, right)).await?;
    }
}

async fn run_unzip<T, A, B, F>(
    done: Done,
    mut input: Receiver<T>,
    left: Sender<A>,
    right: Sender<B>,
    mut split: F,
) -> Run
where
    F: FnMut(T) -> (A, B),
{
    let mut left = Some(left);
    let mut right = Some(right);
    loop {
        let (a, b) = split(utils::recv(&done, &mut input).await?);
        utils::offer(&done, &mut left, a).await?;
        utils::offer(&done, &mut right, b).await?;
        if left.is_none() && right.is_none() {
            return Err(Exit::Disconnected);
        }
    }
}

/// [`Flow::zip`] with the default options.
pub fn zip<A, B, C, F>(a: Receiver<A>, b: Receiver<B>, f: F) -> Receiver<C>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    F: FnMut(A, B) -> C + Send + 'static,
{
    Flow::default().zip(a, b, f)
}

/// [`Flow::unzip`] with the default options.
pub fn unzip<T, A, B, F>(input: Receiver<T>, split: F) -> (Receiver<A>, Receiver<B>)
where
    T: Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    F: FnMut(T) -> (A, B) + Send + 'static,
{
    Flow::default().unzip(input, split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chan::channel;
    use crate::done::Canceller;
    use crate::{collect, generate};
    use std::time::Duration;

    #[tokio::test]
    async fn zip_unequal_lengths() {
        let out = zip(generate([1, 2, 3, 4]), generate(["a", "b", "c"]), |n, s| {
            format!("{n}{s}")
        });
        assert_eq!(collect(out).await, vec!["1a", "2b", "3c"]);
    }

    #[tokio::test]
    async fn zip_with_empty_side() {
        let out = zip(generate(Vec::<u8>::new()), generate([1u8, 2]), |a, b| a + b);
        assert!(collect(out).await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn unzip_pairs() {
        let (left, right) = unzip(generate([(1, 'a'), (2, 'b'), (3, 'c')]), |pair| pair);
        let right = tokio::spawn(collect(right));
        assert_eq!(collect(left).await, vec![1, 2, 3]);
        assert_eq!(right.await.unwrap(), vec!['a', 'b', 'c']);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn unzip_after_zip_is_identity() {
        let xs = vec![10, 20, 30];
        let ys = vec!["p", "q", "r", "s"];
        let zipped = zip(generate(xs.clone()), generate(ys.clone()), |x, y| (x, y));
        let (left, right) = unzip(zipped, |pair| pair);
        let right = tokio::spawn(collect(right));
        assert_eq!(collect(left).await, xs);
        assert_eq!(right.await.unwrap(), ys[..3]);
    }

    #[tokio::test]
    async fn cancel_closes_zip_output() {
        let canceller = Canceller::new();
        let flow = Flow::new().with_done(canceller.done());
        let (_a, a) = channel::<u8>(0);
        let (_b, b) = channel::<u8>(0);
        let mut out = flow.zip(a, b, |x, y| x + y);

        canceller.cancel();
        let closed = tokio::time::timeout(Duration::from_secs(5), out.recv()).await;
        assert_eq!(closed.unwrap(), None);
    }

    #[tokio::test]
    async fn cancel_closes_both_unzip_sides() {
        let canceller = Canceller::new();
        let flow = Flow::new().with_done(canceller.done());
        let (_input, rx) = channel::<(u8, char)>(0);
        let (mut left, mut right) = flow.unzip(rx, |pair| pair);

        canceller.cancel();
        let limit = Duration::from_secs(5);
        assert_eq!(tokio::time::timeout(limit, left.recv()).await.unwrap(), None);
        assert_eq!(tokio::time::timeout(limit, right.recv()).await.unwrap(), None);
    }
}
