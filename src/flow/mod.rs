//! Stage constructors.
//!
//! Every stage is a tokio task that reads from its input channels and writes
//! into output channels it creates and owns. Constructors return the output
//! [`Receiver`]s right away; the task is already running. A stage closes its
//! outputs when its inputs are exhausted, when its cancellation signal fires,
//! or when a stage-specific condition is reached (e.g. [`Flow::take`]).
//!
//! Stage constructors must be called from within a tokio runtime.
//!
//! # Configuration
//!
//! A [`Flow`] holds the options applied to each stage built from it: the
//! cancellation signal every send and receive is raced against, and the
//! buffer capacity of the outputs it creates. The free functions at the
//! crate root use [`Flow::default`]: a signal that never fires and
//! rendezvous (capacity `0`) outputs.
//!
//! # Draining
//!
//! Stages that stop early ([`Flow::take`], [`Flow::take_while`],
//! [`Flow::zip`]) drop their inputs but never drain them. Upstream stages
//! then stop on their next send because nobody is left to receive. To stop a
//! whole pipeline at once, build every stage from the same [`Flow`] and fire
//! its signal.
//!
//! # Split outputs
//!
//! [`Flow::fan_out`], [`Flow::partition`] and [`Flow::unzip`] feed several
//! outputs from one task. Every output must be consumed concurrently, or the
//! stage stalls on the one nobody reads. An output whose receivers are all
//! dropped is skipped from then on.
//!
//! [`Receiver`]: crate::chan::Receiver

use crate::chan::{self, Receiver, Sender};
use crate::done::Done;

mod concat;
mod fan_out;
mod filter;
mod flatten;
mod generate;
mod map;
mod merge;
mod partition;
mod sink;
mod skip;
mod take;
mod zip;

pub use concat::concat;
pub use fan_out::fan_out;
pub use filter::{compact, filter};
pub use flatten::flatten;
pub use generate::{forward, generate};
pub use map::{map, peek};
pub use merge::merge;
pub use partition::partition;
pub use sink::{collect, drain, drain_detached};
pub use skip::{skip, skip_while};
pub use take::{take, take_while};
pub use zip::{unzip, zip};

/// Options shared by the stages built from it.
///
/// # Examples
///
/// ```
/// use futures_flows::done::Canceller;
/// use futures_flows::Flow;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let canceller = Canceller::new();
/// let flow = Flow::new().with_done(canceller.done()).with_capacity(4);
///
/// let numbers = flow.generate(1..=3);
/// let doubled = flow.map(numbers, |n| n * 2);
/// assert_eq!(flow.collect(doubled).await, vec![2, 4, 6]);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Flow {
    done: Done,
    capacity: usize,
}

impl Flow {
    /// Options with a signal that never fires and rendezvous outputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop stages built from this flow once `done` fires.
    pub fn with_done(mut self, done: Done) -> Self {
        self.done = done;
        self
    }

    /// Give the outputs of stages built from this flow room for `capacity`
    /// values. `0` makes every hand-off a rendezvous.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// The cancellation signal.
    pub fn done(&self) -> &Done {
        &self.done
    }

    /// The output buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn channel<T>(&self) -> (Sender<T>, Receiver<T>) {
        chan::channel(self.capacity)
    }

    fn channels<T>(&self, n: usize) -> (Vec<Sender<T>>, Vec<Receiver<T>>) {
        (0..n).map(|_| self.channel()).unzip()
    }
}
