use super::Flow;
use crate::chan::{Receiver, Sender};
use crate::done::Done;
use crate::utils::{self, Run};

impl Flow {
    /// Call `apply` on each value, then pass the value on.
    ///
    /// `apply` gets mutable access, so it may also adjust the value in place.
    pub fn peek<T, F>(&self, input: Receiver<T>, apply: F) -> Receiver<T>
    where
        T: Send + 'static,
        F: FnMut(&mut T) + Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn("peek", run_peek(self.done.clone(), input, tx, apply));
        rx
    }

    /// Transform each value with `f`.
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
    /// let strings = flow.map(numbers, |n| n.to_string());
    /// assert_eq!(flow.collect(strings).await, ["1", "2", "3", "4"]);
    /// # }
    /// ```
    pub fn map<T, U, F>(&self, input: Receiver<T>, f: F) -> Receiver<U>
    where
        T: Send + 'static,
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        let (tx, rx) = self.channel();
        utils::spawn("map", run_map(self.done.clone(), input, tx, f));
        rx
    }
}

async fn run_peek<T, F>(
    done: Done,
    mut input: Receiver<T>,
    output: Sender<T>,
    mut apply: F,
) -> Run
where
    F: FnMut(&mut T),
{
    loop {
        let mut value = utils::recv(&done, &mut input).await?;
        apply(&mut value);
        utils::send(&done, &output, value).await?;
    }
}

async fn run_map<T, U, F>(done: Done, mut input: Receiver<T>, output: Sender<U>, mut f: F) -> Run
where
    F: FnMut(T) -> U,
{
    loop {
        let value = utils::recv(&done, &mut input).await?;
        utils::send(&done, &output, f(value)).await?;
    }
}

/// [`Flow::peek`] with the default options.
pub fn peek<T, F>(input: Receiver<T>, apply: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnMut(&mut T) + Send + 'static,
{
    Flow::default().peek(input, apply)
}

/// [`Flow::map`] with the default options.
pub fn map<T, U, F>(input: Receiver<T>, f: F) -> Receiver<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> U + Send + 'static,
{
    Flow::default().map(input, f)
}
