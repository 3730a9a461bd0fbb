//! Bounded, closeable FIFO channels that connect the stages of a flow.
//!
//! A channel is created with a buffer `capacity`. When the buffer is full a
//! [`Sender::send`] waits until a receiver makes room; when it is empty a
//! [`Receiver::recv`] waits until a value arrives or the channel is closed. A
//! capacity of `0` is a rendezvous: a send only completes once a receiver has
//! taken the value.
//!
//! Closing is done by the sending side, either explicitly with
//! [`Sender::close`] or implicitly when the last [`Sender`] is dropped. Values
//! that were buffered before the channel closed remain receivable, after
//! which receivers observe end-of-stream (`None`).
//!
//! # Examples
//!
//! ```
//! use futures_flows::chan;
//!
//! # futures_lite::future::block_on(async {
//! let (tx, mut rx) = chan::channel(2);
//! tx.send(1).await.unwrap();
//! tx.send(2).await.unwrap();
//! drop(tx);
//!
//! assert_eq!(rx.recv().await, Some(1));
//! assert_eq!(rx.recv().await, Some(2));
//! assert_eq!(rx.recv().await, None);
//! # });
//! ```

mod error;
mod waiters;

pub use error::{SendError, TryRecvError};

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_core::stream::{FusedStream, Stream};
use waiters::Waiters;

/// Create a channel with room for `capacity` buffered values.
///
/// Both halves can be cloned. The channel closes once every [`Sender`] is
/// dropped or any of them calls [`Sender::close`]. Sends fail once every
/// [`Receiver`] is dropped.
pub fn channel<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    let shared = Arc::new(Shared {
        state: Mutex::new(State {
            queue: VecDeque::with_capacity(capacity.max(1)),
            capacity,
            closed: false,
            senders: 1,
            receivers: 1,
            pushed: 0,
            taken: 0,
            send_waiters: Waiters::default(),
            recv_waiters: Waiters::default(),
        }),
    });
    (
        Sender {
            shared: shared.clone(),
        },
        Receiver { shared, key: None },
    )
}

struct Shared<T> {
    state: Mutex<State<T>>,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // Nothing user-supplied runs under this lock, so a poisoned state is
        // still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct State<T> {
    queue: VecDeque<T>,
    capacity: usize,
    closed: bool,
    senders: usize,
    receivers: usize,
    /// Number of values ever pushed; a rendezvous send waits on its own index.
    pushed: u64,
    /// Number of values ever taken by a receiver.
    taken: u64,
    send_waiters: Waiters,
    recv_waiters: Waiters,
}

impl<T> State<T> {
    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.recv_waiters.wake_all();
            self.send_waiters.wake_all();
        }
    }

    fn has_room(&self) -> bool {
        self.queue.len() < self.capacity.max(1)
    }

    /// Take back the value a rendezvous send placed in the slot.
    fn retract(&mut self) -> Option<T> {
        let value = self.queue.pop_back()?;
        self.pushed -= 1;
        self.send_waiters.wake_all();
        Some(value)
    }
}

/// The sending half of a [`channel`].
pub struct Sender<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Sender<T> {
    /// Send a value, waiting for buffer space (or, for a rendezvous channel,
    /// for a receiver to take it).
    ///
    /// Fails with [`SendError`] when the channel is closed or has no
    /// receivers left. Dropping the returned future before it completes
    /// withdraws the value.
    pub fn send(&self, value: T) -> SendFuture<'_, T> {
        SendFuture {
            sender: self,
            value: Some(value),
            ticket: None,
            key: None,
        }
    }

    /// Close the channel for every sender.
    ///
    /// Values already buffered stay receivable, including a rendezvous value
    /// that sits in the slot: its send completes once a receiver takes it.
    /// Sends still waiting for buffer room fail.
    pub fn close(&self) {
        self.shared.lock().close();
    }

    /// Returns `true` if sending can no longer succeed.
    pub fn is_closed(&self) -> bool {
        let state = self.shared.lock();
        state.closed || state.receivers == 0
    }

    /// The buffer capacity this channel was created with.
    pub fn capacity(&self) -> usize {
        self.shared.lock().capacity
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        self.shared.lock().senders += 1;
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.senders -= 1;
        if state.senders == 0 {
            state.close();
        }
    }
}

impl<T> fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("Sender")
            .field("capacity", &state.capacity)
            .field("len", &state.queue.len())
            .field("closed", &state.closed)
            .finish()
    }
}

/// Future returned by [`Sender::send`].
#[must_use = "futures do nothing unless polled or .awaited"]
pub struct SendFuture<'a, T> {
    sender: &'a Sender<T>,
    value: Option<T>,
    /// Index of our value while it waits in a rendezvous slot.
    ticket: Option<u64>,
    key: Option<usize>,
}

// The value is moved in and out by value and never pinned.
impl<T> Unpin for SendFuture<'_, T> {}

impl<T> Future for SendFuture<'_, T> {
    type Output = Result<(), SendError<T>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let mut state = this.sender.shared.lock();

        if let Some(ticket) = this.ticket {
            if state.taken > ticket {
                this.ticket = None;
                state.send_waiters.remove(&mut this.key);
                return Poll::Ready(Ok(()));
            }
            if state.receivers == 0 {
                this.ticket = None;
                state.send_waiters.remove(&mut this.key);
                return match state.retract() {
                    Some(value) => Poll::Ready(Err(SendError(value))),
                    None => Poll::Ready(Ok(())),
                };
            }
            state.send_waiters.register(&mut this.key, cx.waker());
            return Poll::Pending;
        }

        let value = this
            .value
            .take()
            .expect("`SendFuture` polled after completion");

        if state.closed || state.receivers == 0 {
            state.send_waiters.remove(&mut this.key);
            return Poll::Ready(Err(SendError(value)));
        }

        if !state.has_room() {
            this.value = Some(value);
            state.send_waiters.register(&mut this.key, cx.waker());
            return Poll::Pending;
        }

        state.queue.push_back(value);
        state.pushed += 1;
        state.recv_waiters.wake_all();

        if state.capacity > 0 {
            state.send_waiters.remove(&mut this.key);
            Poll::Ready(Ok(()))
        } else {
            this.ticket = Some(state.pushed - 1);
            state.send_waiters.register(&mut this.key, cx.waker());
            Poll::Pending
        }
    }
}

impl<T> Drop for SendFuture<'_, T> {
    fn drop(&mut self) {
        if self.key.is_none() && self.ticket.is_none() {
            return;
        }
        let mut state = self.sender.shared.lock();
        state.send_waiters.remove(&mut self.key);
        let retracted = match self.ticket.take() {
            Some(ticket) if state.taken <= ticket => state.retract(),
            _ => None,
        };
        drop(state);
        drop(retracted);
    }
}

impl<T> fmt::Debug for SendFuture<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendFuture")
            .field("sender", self.sender)
            .field("handed_off", &self.ticket.is_some())
            .finish()
    }
}

/// The receiving half of a [`channel`].
///
/// Receivers can be cloned; every value is delivered to exactly one of them.
pub struct Receiver<T> {
    shared: Arc<Shared<T>>,
    key: Option<usize>,
}

impl<T> Receiver<T> {
    /// Receive the next value, or `None` once the channel is closed and
    /// drained.
    pub fn recv(&mut self) -> RecvFuture<'_, T> {
        RecvFuture { receiver: self }
    }

    /// Receive a value without waiting.
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        let mut state = self.shared.lock();
        match state.queue.pop_front() {
            Some(value) => {
                state.taken += 1;
                state.send_waiters.wake_all();
                Ok(value)
            }
            None if state.closed => Err(TryRecvError::Closed),
            None => Err(TryRecvError::Empty),
        }
    }

    /// Poll for the next value.
    pub fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let mut state = self.shared.lock();
        if let Some(value) = state.queue.pop_front() {
            state.taken += 1;
            state.send_waiters.wake_all();
            state.recv_waiters.remove(&mut self.key);
            return Poll::Ready(Some(value));
        }
        if state.closed {
            state.recv_waiters.remove(&mut self.key);
            return Poll::Ready(None);
        }
        state.recv_waiters.register(&mut self.key, cx.waker());
        Poll::Pending
    }

    /// Number of values currently buffered.
    pub fn len(&self) -> usize {
        self.shared.lock().queue.len()
    }

    /// Returns `true` if no values are currently buffered.
    pub fn is_empty(&self) -> bool {
        self.shared.lock().queue.is_empty()
    }

    /// The buffer capacity this channel was created with.
    pub fn capacity(&self) -> usize {
        self.shared.lock().capacity
    }
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        self.shared.lock().receivers += 1;
        Self {
            shared: self.shared.clone(),
            key: None,
        }
    }
}

impl<T> Drop for Receiver<T> {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.recv_waiters.remove(&mut self.key);
        state.receivers -= 1;
        if state.receivers == 0 {
            state.send_waiters.wake_all();
        }
    }
}

impl<T> Stream for Receiver<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_recv(cx)
    }
}

impl<T> FusedStream for Receiver<T> {
    fn is_terminated(&self) -> bool {
        let state = self.shared.lock();
        state.closed && state.queue.is_empty()
    }
}

impl<T> fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("Receiver")
            .field("capacity", &state.capacity)
            .field("len", &state.queue.len())
            .field("closed", &state.closed)
            .finish()
    }
}

/// Future returned by [`Receiver::recv`].
#[derive(Debug)]
#[must_use = "futures do nothing unless polled or .awaited"]
pub struct RecvFuture<'a, T> {
    receiver: &'a mut Receiver<T>,
}

impl<T> Future for RecvFuture<'_, T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.receiver.poll_recv(cx)
    }
}

/// A bidirectional channel handle.
///
/// Holds one sender and one receiver, so the channel neither closes nor
/// disconnects while the `Chan` is alive. Narrow it to the side you need
/// with [`Chan::sender`], [`Chan::receiver`], [`senders`] or [`receivers`].
pub struct Chan<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> Chan<T> {
    /// Create a bidirectional handle to a new channel.
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = channel(capacity);
        Self { sender, receiver }
    }

    /// A send-only view of this channel.
    pub fn sender(&self) -> Sender<T> {
        self.sender.clone()
    }

    /// A receive-only view of this channel.
    pub fn receiver(&self) -> Receiver<T> {
        self.receiver.clone()
    }

    /// Close the channel.
    pub fn close(&self) {
        self.sender.close();
    }

    /// Split into the two halves without cloning.
    pub fn into_split(self) -> (Sender<T>, Receiver<T>) {
        (self.sender, self.receiver)
    }
}

impl<T> fmt::Debug for Chan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Chan").field(&self.receiver).finish()
    }
}

/// Narrow bidirectional handles to receive-only views.
///
/// Each view is a counted clone of the handle's receiver, so the channels
/// cannot disconnect while the views are alive.
pub fn receivers<T>(chans: &[Chan<T>]) -> Vec<Receiver<T>> {
    chans.iter().map(Chan::receiver).collect()
}

/// Narrow bidirectional handles to send-only views.
///
/// Each view is a counted clone of the handle's sender, so the channels do
/// not close on drop while the views are alive.
pub fn senders<T>(chans: &[Chan<T>]) -> Vec<Sender<T>> {
    chans.iter().map(Chan::sender).collect()
}
