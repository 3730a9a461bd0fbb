//! Utilities to implement the stages of this crate.

mod stage;
mod until_done;

pub(crate) use stage::{offer, recv, send, spawn, Exit, Run};
pub(crate) use until_done::UntilDone;
