use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Run};

impl Flow {
    /// Discard values while `predicate` returns `true`, then pass on
    /// everything from the first value that fails it.
    pub fn skip_while<T, F>(&self, input: Receiver<T>, predicate: F) -> Receiver<T>
    where
        T: Send + 'static,
        F: FnMut(&T) -> bool + Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn(
            "skip_while",
            run_skip_while(self.done.clone(), input, tx, predicate),
        );
        rx
    }

    /// Discard the first `n` values and pass on the rest.
    pub fn skip<T>(&self, input: Receiver<T>, n: usize) -> Receiver<T>
    where
        T: Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn("skip", run_skip(self.done.clone(), input, tx, n));
        rx
    }
}

async fn run_skip_while<T, F>(
    done: Done,
    mut input: Receiver<T>,
    output: Sender<T>,
    mut predicate: F,
) -> Run
where
    F: FnMut(&T) -> bool,
{
    let first = loop {
        let value = utils::recv(&done, &mut input).await?;
        if !predicate(&value) {
            break value;
        }
    };
    utils::send(&done, &output, first).await?;
    pass_rest(&done, &mut input, &output).await
}

async fn run_skip<T>(done: Done, mut input: Receiver<T>, output: Sender<T>, n: usize) -> Run {
    for _ in 0..n {
        utils::recv(&done, &mut input).await?;
    }
    pass_rest(&done, &mut input, &output).await
}

async fn pass_rest<T>(done: &Done, input: &mut Receiver<T>, output: &Sender<T>) -> Run {
    loop {
        let value = utils::recv(done, input).await?;
        utils::send(done, output, value).await?;
    }
}

/// [`Flow::skip_while`] with the default options.
pub fn skip_while<T, F>(input: Receiver<T>, predicate: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnMut(&T) -> bool + Send + 'static,
{
    Flow::default().skip_while(input, predicate)
}

/// [`Flow::skip`] with the default options.
pub fn skip<T>(input: Receiver<T>, n: usize) -> Receiver<T>
where
    T: Send + 'static,
{
    Flow::default().skip(input, n)
}
