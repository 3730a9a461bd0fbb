//! Back-pressured, cancellable producer/consumer pipelines for async Rust.
//!
//! A pipeline is built out of _stages_. Each stage is a task that reads
//! values from one or more input channels and writes values into output
//! channels it owns. Stage constructors take their inputs as
//! [`Receiver`][chan::Receiver]s and return their outputs as `Receiver`s,
//! so stages compose by passing one stage's output to the next.
//!
//! Channels are bounded, so a slow consumer throttles everything upstream of
//! it. Completion flows downstream by closing channels: when a stage's
//! inputs are exhausted it closes its outputs, and the stages after it
//! follow. A stage also stops when its cancellation signal fires, see
//! [`done`].
//!
//! # Operations
//!
//! - Sources: [`generate`], [`forward`].
//! - Transforms: [`peek`], [`map`], [`filter`], [`compact`], [`flatten`],
//!   [`take`], [`take_while`], [`skip`], [`skip_while`].
//! - Topology: [`merge`], [`fan_out`], [`concat`], [`partition`], [`zip`],
//!   [`unzip`].
//! - Sinks: [`collect`], [`drain`], [`drain_detached`].
//! - Cancellation: [`done::some_done`], [`done::every_done`].
//!
//! The free functions use default options. To set a cancellation signal or a
//! buffer capacity, call the same operation on a configured [`Flow`].
//!
//! # Examples
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let numbers = futures_flows::generate(1..=8);
//! let evens = futures_flows::filter(numbers, |n| n % 2 == 0);
//! let squares = futures_flows::map(evens, |n| n * n);
//! assert_eq!(futures_flows::collect(squares).await, [4, 16, 36, 64]);
//! # }
//! ```
//!
//! Stopping a pipeline early:
//!
//! ```
//! use futures_flows::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let canceller = Canceller::new();
//! let flow = Flow::new().with_done(canceller.done());
//!
//! let mut naturals = flow.map(flow.generate(0u64..), |n| n + 1);
//! assert_eq!(naturals.recv().await, Some(1));
//!
//! canceller.cancel();
//! assert!(flow.collect(naturals).await.is_empty());
//! # }
//! ```

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod utils;

/// The futures flows prelude.
pub mod prelude {
    pub use super::chan::{Receiver, Sender};
    pub use super::done::{Canceller, Done};
    pub use super::flow::Flow;
}

pub mod chan;
pub mod done;
pub mod flow;

pub use flow::{
    collect, compact, concat, drain, drain_detached, fan_out, filter, flatten, forward, generate,
    map, merge, partition, peek, skip, skip_while, take, take_while, unzip, zip, Flow,
};
