use slab::Slab;
use std::task::Waker;

/// A registry of parked tasks waiting on one side of a channel.
///
/// Each waiting future holds a key into the registry so that re-polling
/// replaces its waker instead of growing the list, and dropping the future
/// removes its entry.
#[derive(Debug, Default)]
pub(crate) struct Waiters {
    wakers: Slab<Option<Waker>>,
}

impl Waiters {
    /// Register `waker` under `key`, allocating a key on first use.
    pub(crate) fn register(&mut self, key: &mut Option<usize>, waker: &Waker) {
        match key.and_then(|k| self.wakers.get_mut(k)) {
            Some(slot) => match slot {
                Some(existing) if existing.will_wake(waker) => {}
                _ => *slot = Some(waker.clone()),
            },
            None => *key = Some(self.wakers.insert(Some(waker.clone()))),
        }
    }

    /// Forget the entry behind `key`, if any.
    pub(crate) fn remove(&mut self, key: &mut Option<usize>) {
        if let Some(k) = key.take() {
            self.wakers.try_remove(k);
        }
    }

    /// Wake every registered task. Entries stay allocated until their owner
    /// removes them; a woken entry holds no waker until it is re-registered.
    pub(crate) fn wake_all(&mut self) {
        for (_, slot) in self.wakers.iter_mut() {
            if let Some(waker) = slot.take() {
                waker.wake();
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.wakers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::task::noop_waker;

    #[test]
    fn reregistering_reuses_the_key() {
        let mut waiters = Waiters::default();
        let waker = noop_waker();
        let mut key = None;
        waiters.register(&mut key, &waker);
        let first = key;
        waiters.register(&mut key, &waker);
        assert_eq!(key, first);
        assert_eq!(waiters.len(), 1);

        waiters.remove(&mut key);
        assert_eq!(key, None);
        assert_eq!(waiters.len(), 0);
    }

    #[test]
    fn wake_all_keeps_entries() {
        let mut waiters = Waiters::default();
        let waker = noop_waker();
        let (mut a, mut b) = (None, None);
        waiters.register(&mut a, &waker);
        waiters.register(&mut b, &waker);
        waiters.wake_all();
        assert_eq!(waiters.len(), 2);
        waiters.remove(&mut a);
        waiters.remove(&mut b);
        assert_eq!(waiters.len(), 0);
    }
}
