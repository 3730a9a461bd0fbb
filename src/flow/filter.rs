use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Run};

impl Flow {
    /// Pass on only the values for which `include` returns `true`.
    pub fn filter<T, F>(&self, input: Receiver<T>, include: F) -> Receiver<T>
    where
        T: Send + 'static,
        F: FnMut(&T) -> bool + Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn("filter", run_filter(self.done.clone(), input, tx, include));
        rx
    }

    /// Drop values equal to the last value passed on.
    ///
    /// The first value always passes. Each later value passes only if
    /// `equal(last_passed, value)` is `false`, so runs of equal values
    /// collapse to their first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures_flows::Flow;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let flow = Flow::new();
    /// let values = flow.generate([1, 1, 2, 3, 3, 3, 1]);
    /// let compacted = flow.compact(values, |a, b| a == b);
    /// assert_eq!(flow.collect(compacted).await, [1, 2, 3, 1]);
    /// # }
    /// ```
    pub fn compact<T, F>(&self, input: Receiver<T>, equal: F) -> Receiver<T>
    where
        T: Clone + Send + 'static,
        F: FnMut(&T, &T) -> bool + Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn("compact", run_compact(self.done.clone(), input, tx, equal));
        rx
    }
}

async fn run_filter<T, F>(
    done: Done,
    mut input: Receiver<T>,
    output: Sender<T>,
    mut include: F,
) -> Run
where
    F: FnMut(&T) -> bool,
{
    loop {
        let value = utils::recv(&done, &mut input).await?;
        if include(&value) {
            utils::send(&done, &output, value).await?;
        }
    }
}

async fn run_compact<T, F>(
    done: Done,
    mut input: Receiver<T>,
    output: Sender<T>,
    mut equal: F,
) -> Run
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let mut last = utils::recv(&done, &mut input).await?;
    utils::send(&done, &output, last.clone()).await?;
    loop {
        let value = utils::recv(&done, &mut input).await?;
        if !equal(&last, &value) {
            last = value.clone();
            utils::send(&done, &output, value).await?;
        }
    }
}

/// [`Flow::filter`] with the default options.
pub fn filter<T, F>(input: Receiver<T>, include: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnMut(&T) -> bool + Send + 'static,
{
    Flow::default().filter(input, include)
}

/// [`Flow::compact`] with the default options.
pub fn compact<T, F>(input: Receiver<T>, equal: F) -> Receiver<T>
where
    T: Clone + Send + 'static,
    F: FnMut(&T, &T) -> bool + Send + 'static,
{
    Flow::default().compact(input, equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chan::channel;
    use crate::done::Canceller;
    use crate::{collect, generate};
    use std::time::Duration;

    #[tokio::test]
    async fn filter_evens() {
        let out = filter(generate(1..=8), |n| n % 2 == 0);
        assert_eq!(collect(out).await, vec![2, 4, 6, 8]);
    }

    #[tokio::test]
    async fn filter_everything_out() {
        let out = filter(generate(1..=8), |_| false);
        assert!(collect(out).await.is_empty());
    }

    #[tokio::test]
    async fn filter_true_is_identity() {
        let xs = vec!["b", "a", "c"];
        let out = filter(generate(xs.clone()), |_| true);
        assert_eq!(collect(out).await, xs);
    }

    #[tokio::test]
    async fn compact_duplicates() {
        let xs = vec![1, 2, 3, 4, 5, 5, 5, 6, 7, 7, 7, 8, 8, 8, 9];
        let out = compact(generate(xs), |a, b| a == b);
        assert_eq!(collect(out).await, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[tokio::test]
    async fn compact_compares_with_last_passed() {
        // Within 1 of the last value that passed counts as equal.
        let out = compact(generate([1, 2, 3, 4, 6]), |a: &i32, b: &i32| (a - b).abs() <= 1);
        assert_eq!(collect(out).await, vec![1, 3, 6]);
    }

    #[tokio::test]
    async fn compact_empty() {
        let out = compact(generate(Vec::<u8>::new()), |a, b| a == b);
        assert!(collect(out).await.is_empty());
    }

    #[tokio::test]
    async fn cancel_closes_output() {
        let canceller = Canceller::new();
        let flow = Flow::new().with_done(canceller.done());
        let (filter_tx, filter_in) = channel::<u8>(0);
        let (_compact_tx, compact_in) = channel::<u8>(0);
        let mut filtered = flow.filter(filter_in, |n| n % 2 == 0);
        let mut compacted = flow.compact(compact_in, |a, b| a == b);

        // The filter drops this value and goes back to waiting.
        filter_tx.send(1).await.unwrap();
        canceller.cancel();
        let limit = Duration::from_secs(5);
        assert_eq!(tokio::time::timeout(limit, filtered.recv()).await.unwrap(), None);
        assert_eq!(tokio::time::timeout(limit, compacted.recv()).await.unwrap(), None);
    }
}
