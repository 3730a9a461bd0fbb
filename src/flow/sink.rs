use super::Flow;
use crate::chan::Receiver;
use crate::done::Done;
use crate::utils::{self, Run};

impl Flow {
    /// Receive every value of `input` into a `Vec`.
    ///
    /// Returns once `input` is exhausted, or, if this flow's signal fires
    /// first, with the values received up to that point.
    pub async fn collect<T>(&self, mut input: Receiver<T>) -> Vec<T> {
        let mut values = Vec::new();
        while let Ok(value) = utils::recv(&self.done, &mut input).await {
            values.push(value);
        }
        values
    }

    /// Receive and discard every value of `input` on the calling task.
    ///
    /// Returns once `input` is exhausted or this flow's signal fires. Use
    /// this to release a producer whose consumer stopped early.
    pub async fn drain<T>(&self, mut input: Receiver<T>) {
        while utils::recv(&self.done, &mut input).await.is_ok() {}
    }

    /// Like [`Flow::drain`], but on a spawned task. Returns immediately.
    pub fn drain_detached<T>(&self, input: Receiver<T>)
    where
        T: Send + 'static,
    {
        utils::spawn("drain", run_drain(self.done.clone(), input));
    }
}

async fn run_drain<T>(done: Done, mut input: Receiver<T>) -> Run {
    loop {
        utils::recv(&done, &mut input).await?;
    }
}

/// [`Flow::collect`] with the default options.
pub async fn collect<T>(input: Receiver<T>) -> Vec<T> {
    Flow::default().collect(input).await
}

/// [`Flow::drain`] with the default options.
pub async fn drain<T>(input: Receiver<T>) {
    Flow::default().drain(input).await
}

/// [`Flow::drain_detached`] with the default options.
pub fn drain_detached<T>(input: Receiver<T>)
where
    T: Send + 'static,
{
    Flow::default().drain_detached(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chan::channel;
    use crate::done::Canceller;
    use crate::generate;
    use std::time::Duration;

    #[tokio::test]
    async fn collect_generated() {
        let xs = vec![3, 1, 4, 1, 5];
        assert_eq!(collect(generate(xs.clone())).await, xs);
    }

    #[tokio::test]
    async fn collect_prefix_until_cancelled() {
        let canceller = Canceller::new();
        let flow = Flow::new().with_done(canceller.done());
        let (tx, rx) = channel(4);
        tx.send(1).await.unwrap();
        tx.send(2).await.unwrap();

        let collecting = tokio::spawn(async move { flow.collect(rx).await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();

        let prefix = tokio::time::timeout(Duration::from_secs(5), collecting)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(prefix, vec![1, 2]);
        drop(tx);
    }

    #[tokio::test]
    async fn drain_runs_producer_to_completion() {
        let mut source = generate(0..5);
        assert_eq!(source.recv().await, Some(0));
        tokio::time::timeout(Duration::from_secs(5), drain(source))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn drain_detached_empties_channel() {
        let (tx, rx) = channel(0);
        drain_detached(rx);
        for n in 0..10 {
            tx.send(n).await.unwrap();
        }
    }
}
